//! Server test utilities.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;
use vignette_core::AppConfig;
use vignette_server::{AppState, create_router};

/// A test server wrapper with a temporary storage root.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test server after applying `adjust` to the default test
    /// configuration.
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp directory");
        let root = temp_dir.path().join("documents");
        std::fs::create_dir_all(&root).expect("failed to create storage root");

        let mut config = AppConfig::for_testing(&root);
        adjust(&mut config);

        let state = AppState::new(config);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// The storage root documents are served from.
    pub fn root(&self) -> &Path {
        self.state.store.root()
    }

    /// Write a source document under the storage root, creating parent
    /// directories as needed.
    pub fn write_source(&self, relative: &str, bytes: &[u8]) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create source directory");
        }
        std::fs::write(&path, bytes).expect("failed to write source document");
    }

    /// Issue a GET request against the router.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// Issue a GET request and collect the body.
    pub async fn get_bytes(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self.get(uri).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, body.to_vec())
    }
}
