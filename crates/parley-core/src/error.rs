use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("Unknown product id: {product_id}")]
    UnknownProduct { product_id: String },

    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ParleyError>;
