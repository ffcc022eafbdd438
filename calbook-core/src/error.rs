//! Error types for the calbook ecosystem.

use thiserror::Error;

/// Errors that can occur in calbook operations.
#[derive(Error, Debug)]
pub enum CalbookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Calendar generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calbook operations.
pub type CalbookResult<T> = Result<T, CalbookError>;
