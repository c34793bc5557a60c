//! Prometheus metrics for the Vignette server.
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus
//! scraping; restrict it at the infrastructure level when exposed beyond
//! a private network.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Previews rendered successfully, labeled by source format.
pub static PREVIEWS_RENDERED: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vignette_previews_rendered_total",
            "Total previews rendered successfully",
        ),
        &["format"],
    )
    .expect("metric creation failed")
});

pub static PLACEHOLDERS_SUBSTITUTED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "vignette_placeholders_substituted_total",
        "Total responses served with a placeholder body",
    )
    .expect("metric creation failed")
});

pub static RENDER_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "vignette_render_failures_total",
        "Total renderer failures absorbed by the fallback policy",
    )
    .expect("metric creation failed")
});

pub static CACHE_HITS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "vignette_preview_cache_hits_total",
        "Total preview requests that joined or reused a cached render",
    )
    .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry. Idempotent.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(PREVIEWS_RENDERED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(PLACEHOLDERS_SUBSTITUTED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(RENDER_FAILURES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(CACHE_HITS.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            format!("failed to encode metrics: {e}").into_bytes(),
        ),
    }
}
