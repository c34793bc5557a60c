//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/v1/preview", get(handlers::path_preview))
        .route("/v1/document-preview", get(handlers::document_preview))
        // Unauthenticated for load balancers and orchestration probes.
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/ping", get(handlers::ping));

    let mut router = Router::new().merge(api_routes);

    if state.config.server.metrics_enabled {
        router = router.merge(Router::new().route("/metrics", get(metrics_handler)));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
