use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate operation {0:?} in path item")]
    DuplicateOperation(String),

    #[error("extension key {0:?} collides with a declared field")]
    ExtensionCollision(String),
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("ambiguous routing: duplicate {method} operation for path {path}")]
    DuplicateRoute { path: String, method: String },

    #[error("unknown route table: {0}")]
    UnknownTable(String),

    #[error("failed to render document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
