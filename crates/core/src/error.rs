//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dimension: {value} (must be between 1 and {max})")]
    InvalidDimension { value: u32, max: u32 },

    #[error("invalid page number: {0} (must be at least 1)")]
    InvalidPage(u32),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
