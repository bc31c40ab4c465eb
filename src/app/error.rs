use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShioriError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ShioriError>;
