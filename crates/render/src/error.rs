//! Render error types.

use thiserror::Error;

/// Renderer failure kinds.
///
/// Every variant is absorbed by the pipeline's placeholder fallback; none
/// escapes to the caller as a response error.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("unsupported source format: {0}")]
    Unsupported(String),

    #[error("render engine unavailable: {0}")]
    Engine(String),

    #[error("document has no pages")]
    EmptyDocument,

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("render timed out after {0} seconds")]
    Timeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
