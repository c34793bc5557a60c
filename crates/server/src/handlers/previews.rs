//! Preview endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use vignette_core::{Fingerprint, Preview, size};

/// Successful responses are cacheable for a day; the fingerprint `ETag`
/// lets clients revalidate.
const CACHE_CONTROL_VALUE: &str = "max-age=86400";

/// Query parameters for the generic path entry point.
#[derive(Debug, Deserialize)]
pub struct PathPreviewParams {
    pub path: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub page: Option<u32>,
}

/// Query parameters for the period+filename entry point.
#[derive(Debug, Deserialize)]
pub struct DocumentPreviewParams {
    pub period: Option<String>,
    pub filename: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub page: Option<u32>,
}

/// GET /v1/preview - Preview by raw relative path.
///
/// A missing source is a distinct 404 on this entry point.
pub async fn path_preview(
    State(state): State<AppState>,
    Query(params): Query<PathPreviewParams>,
) -> ApiResult<Response> {
    let path = require_param(params.path.as_deref(), "path")?;
    let (width, height, page) = validate_render_params(params.width, params.height, params.page)?;

    let preview = state
        .pipeline
        .preview_by_path(path, width, height, page)
        .await?;

    let fingerprint = Fingerprint::compute(&[
        "path",
        path,
        &dimension_part(width),
        &dimension_part(height),
        &page.to_string(),
    ]);
    Ok(image_response(preview, &fingerprint))
}

/// GET /v1/document-preview - Preview by period and filename.
///
/// Never 404: any failure past parameter validation yields a placeholder
/// image with a success status.
pub async fn document_preview(
    State(state): State<AppState>,
    Query(params): Query<DocumentPreviewParams>,
) -> ApiResult<Response> {
    let period = require_param(params.period.as_deref(), "period")?;
    let filename = require_param(params.filename.as_deref(), "filename")?;
    let (width, height, page) = validate_render_params(params.width, params.height, params.page)?;

    let preview = state
        .pipeline
        .preview_by_period(period, filename, width, height, page)
        .await?;

    let fingerprint = Fingerprint::compute(&[
        "period",
        period,
        filename,
        &dimension_part(width),
        &dimension_part(height),
        &page.to_string(),
    ]);
    Ok(image_response(preview, &fingerprint))
}

fn require_param<'a>(value: Option<&'a str>, name: &str) -> ApiResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("missing required parameter: {name}")))
}

/// Boundary validation: out-of-range dimensions are rejected before any
/// filesystem access.
fn validate_render_params(
    width: Option<u32>,
    height: Option<u32>,
    page: Option<u32>,
) -> ApiResult<(Option<u32>, Option<u32>, u32)> {
    for value in [width, height].into_iter().flatten() {
        size::validate_requested(value).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    }
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::BadRequest(
            "page must be at least 1".to_string(),
        ));
    }
    Ok((width, height, page))
}

fn dimension_part(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn image_response(preview: Preview, fingerprint: &Fingerprint) -> Response {
    let etag = fingerprint.etag();
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, preview.media_type.as_str()),
            (CACHE_CONTROL, CACHE_CONTROL_VALUE),
            (ETAG, etag.as_str()),
        ],
        Body::from(preview.bytes),
    )
        .into_response()
}
