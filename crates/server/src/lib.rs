//! HTTP API server for the Vignette preview service.
//!
//! This crate provides the HTTP surface and orchestration:
//! - Preview endpoints (generic path, period+filename)
//! - The preview pipeline with its placeholder fallback policy
//! - The optional in-memory single-flight preview cache
//! - Health, liveness, and metrics endpoints

pub mod cache;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use pipeline::PreviewPipeline;
pub use routes::create_router;
pub use state::AppState;
