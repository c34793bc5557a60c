//! Application state shared across handlers.

use crate::pipeline::PreviewPipeline;
use std::sync::Arc;
use vignette_core::AppConfig;
use vignette_storage::DocumentStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Sandboxed document store.
    pub store: Arc<DocumentStore>,
    /// Preview pipeline orchestrator.
    pub pipeline: Arc<PreviewPipeline>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if configuration validation fails.
    pub fn new(config: AppConfig) -> Self {
        if let Err(error) = config.validate() {
            panic!("invalid configuration: {error}");
        }

        let store = Arc::new(DocumentStore::new(&config.storage.root));
        let pipeline = Arc::new(PreviewPipeline::new(&config.preview, store.clone()));

        Self {
            config: Arc::new(config),
            store,
            pipeline,
        }
    }
}
