//! Storage error types.

use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source not found: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
