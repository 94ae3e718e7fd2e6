use thiserror::Error;

#[derive(Error, Debug)]
pub enum NomadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid review: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

pub type Result<T> = std::result::Result<T, NomadError>;
