//! Core domain types and shared logic for the Vignette preview service.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Application configuration
//! - Document format classification
//! - Size-constraint resolution (target boxes and the size policy)
//! - Rendered preview results and media types
//! - Request fingerprints for HTTP cache validation

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod preview;
pub mod size;

pub use config::{AppConfig, PreviewConfig, ServerConfig, StorageConfig};
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use format::DocumentFormat;
pub use preview::{MediaType, Preview};
pub use size::{Anchor, MAX_DIMENSION, SizePolicy, TargetBox};
