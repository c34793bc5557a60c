//! Pipeline-level tests for the fallback policy and error kinds.

mod common;

use common::TestServer;
use common::fixtures::{decoded_dimensions, png_image};
use vignette_core::MediaType;
use vignette_server::ApiError;

#[tokio::test]
async fn path_entry_point_surfaces_not_found() {
    let server = TestServer::new();
    let result = server
        .state
        .pipeline
        .preview_by_path("missing.png", None, None, 1)
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn traversal_is_a_terminal_rejection_on_both_entry_points() {
    let server = TestServer::new();

    let by_path = server
        .state
        .pipeline
        .preview_by_path("../escape.png", None, None, 1)
        .await;
    assert!(matches!(by_path, Err(ApiError::BadRequest(_))));

    let by_period = server
        .state
        .pipeline
        .preview_by_period("..", "a.pdf", None, None, 1)
        .await;
    assert!(matches!(by_period, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn period_entry_point_absorbs_missing_sources() {
    let server = TestServer::new();
    let preview = server
        .state
        .pipeline
        .preview_by_period("1999-12", "gone.pdf", Some(100), Some(80), 1)
        .await
        .expect("fallback must succeed");
    assert_eq!(preview.media_type, MediaType::Png);
    assert_eq!(decoded_dimensions(&preview.bytes), (100, 80));
}

#[tokio::test]
async fn render_failure_yields_placeholder_not_error() {
    let server = TestServer::new();
    server.write_source("2024-01/broken.png", b"garbage");

    let preview = server
        .state
        .pipeline
        .preview_by_period("2024-01", "broken.png", None, None, 1)
        .await
        .expect("fallback must succeed");
    assert_eq!(preview.media_type, MediaType::Png);
    assert_eq!(decoded_dimensions(&preview.bytes), (256, 256));
}

#[tokio::test]
async fn successful_render_reports_source_media_type() {
    let server = TestServer::new();
    server.write_source("a.png", &png_image(200, 100));
    server.write_source("b.bmp", &png_image(200, 100));

    let png_preview = server
        .state
        .pipeline
        .preview_by_path("a.png", None, None, 1)
        .await
        .unwrap();
    assert_eq!(png_preview.media_type, MediaType::Png);

    // A .bmp extension encodes JPEG regardless of the payload codec.
    let jpeg_preview = server
        .state
        .pipeline
        .preview_by_path("b.bmp", None, None, 1)
        .await
        .unwrap();
    assert_eq!(jpeg_preview.media_type, MediaType::Jpeg);
}

#[tokio::test]
async fn repeated_renders_reuse_the_cache() {
    let server = TestServer::new();
    server.write_source("a.png", &png_image(300, 300));

    let first = server
        .state
        .pipeline
        .preview_by_path("a.png", Some(64), Some(64), 1)
        .await
        .unwrap();
    let second = server
        .state
        .pipeline
        .preview_by_path("a.png", Some(64), Some(64), 1)
        .await
        .unwrap();
    assert_eq!(first.bytes, second.bytes);
}
