use thiserror::Error;

/// Structural problems found while loading or validating an [`crate::Infrastructure`].
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("duplicate node id `{id}`")]
    DuplicateId { id: String },
    #[error("node `{id}` is nested deeper than {max} levels; the tree is malformed")]
    DepthExceeded { id: String, max: usize },
    #[error("workload `{id}` must not have children")]
    LeafWithChildren { id: String },
    #[error("top-level node `{id}` is not an environment")]
    RootNotEnvironment { id: String },
    #[error("invalid infrastructure json: {0}")]
    Json(#[from] serde_json::Error),
}
