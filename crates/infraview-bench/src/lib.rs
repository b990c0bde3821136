use infraview_app::InfraProject;
use infraview_core::Infrastructure;
use infraview_core::sample::cloud_multi_region;
use tempfile::TempDir;

/// Leaf count of the large pool in every benchmark fixture.
pub const LARGE_POOL: usize = 100_000;

pub fn large_sample() -> Infrastructure {
    cloud_multi_region(LARGE_POOL)
}

/// Write the large sample as a project file into a fresh temp dir.
pub fn write_sample_project() -> anyhow::Result<(TempDir, std::path::PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("infra.json");
    InfraProject::new(large_sample()).save(&path)?;
    Ok((dir, path))
}
