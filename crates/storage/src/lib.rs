//! Sandboxed document storage for the Vignette preview service.
//!
//! This crate resolves external identifiers (raw relative paths, or
//! period+filename pairs) into absolute paths rooted at a configured
//! storage root, rejecting traversal attempts before any filesystem
//! access, and reads source documents for the renderers.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, SourceFile};
