use crate::ViewSettings;
use anyhow::Context;
use infraview_core::{Infrastructure, ModelError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid infrastructure in {path}: {source}")]
    InvalidModel {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// On-disk document: view settings plus the infrastructure to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfraProject {
    #[serde(default)]
    pub settings: ViewSettings,
    pub infrastructure: Infrastructure,
}

impl InfraProject {
    pub fn new(infrastructure: Infrastructure) -> Self {
        Self {
            settings: ViewSettings::default(),
            infrastructure,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let project: InfraProject =
            serde_json::from_str(&content).map_err(|source| ProjectError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        project
            .infrastructure
            .validate()
            .map_err(|source| ProjectError::InvalidModel {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            "Loaded project {} ({} nodes)",
            project.infrastructure.name,
            project.infrastructure.node_count()
        );
        Ok(project)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write project to {}", path.display()))?;
        Ok(())
    }
}

/// Load a bare infrastructure document, without settings.
pub fn load_infrastructure(path: &Path) -> anyhow::Result<Infrastructure> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let infrastructure = Infrastructure::from_json_str(&content)
        .with_context(|| format!("Invalid infrastructure in {}", path.display()))?;
    Ok(infrastructure)
}
