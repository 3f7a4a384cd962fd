use crate::generation::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LicenPrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Question generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, LicenPrepError>;
