//! The preview pipeline orchestrator.
//!
//! Sequences resolution, classification, and rendering, and owns the
//! fallback policy: a rejected identifier is a terminal request-validation
//! error, but once resolution succeeds, no failure escapes as a response
//! error on the period entry point — the caller receives a placeholder
//! body instead. The generic path entry point additionally surfaces a
//! missing source as a distinct not-found.

use crate::cache::{CacheKey, PreviewCache};
use crate::error::ApiError;
use crate::metrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use vignette_core::{DocumentFormat, Preview, PreviewConfig, SizePolicy, TargetBox, format};
use vignette_render::{RenderError, paged, placeholder, raster};
use vignette_storage::{DocumentStore, SourceFile, StoreError};

/// Orchestrates preview rendering for both entry points.
pub struct PreviewPipeline {
    store: Arc<DocumentStore>,
    policy: SizePolicy,
    cache: Option<PreviewCache>,
    render_timeout: Duration,
}

impl PreviewPipeline {
    /// Create a pipeline over the given store.
    pub fn new(config: &PreviewConfig, store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            policy: SizePolicy::new(config.default_width, config.default_height),
            cache: config
                .cache_enabled
                .then(|| PreviewCache::new(config.cache_capacity)),
            render_timeout: config.render_timeout(),
        }
    }

    /// Render a preview for a raw relative-path identifier.
    ///
    /// Traversal rejection and a missing source are surfaced to the
    /// caller; failures after that point fall back to a placeholder.
    pub async fn preview_by_path(
        &self,
        identifier: &str,
        width: Option<u32>,
        height: Option<u32>,
        page: u32,
    ) -> Result<Preview, ApiError> {
        let resolved = self
            .store
            .resolve_relative(identifier)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let target = self.policy.resolve(width, height);
        let source = match self.store.open(&resolved).await {
            Ok(source) => source,
            Err(StoreError::NotFound(_)) => {
                return Err(ApiError::NotFound(format!("source not found: {identifier}")));
            }
            Err(StoreError::InvalidPath(_)) => {
                // A symlink escaping the root; report not-found rather
                // than leaking filesystem layout.
                return Err(ApiError::NotFound(format!("source not found: {identifier}")));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(self.render_or_placeholder(&source, target, page).await)
    }

    /// Render a preview for a period+filename identifier.
    ///
    /// Only traversal rejection escapes; a missing period, missing file,
    /// or any render failure yields a placeholder with a success status.
    pub async fn preview_by_period(
        &self,
        period: &str,
        filename: &str,
        width: Option<u32>,
        height: Option<u32>,
        page: u32,
    ) -> Result<Preview, ApiError> {
        let resolved = self
            .store
            .resolve_period(period, filename)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let target = self.policy.resolve(width, height);
        let source = match self.store.open(&resolved).await {
            Ok(source) => source,
            Err(error) => {
                info!(period, filename, %error, "source unavailable, substituting placeholder");
                return Ok(self.placeholder(&target));
            }
        };

        Ok(self.render_or_placeholder(&source, target, page).await)
    }

    /// Render, absorbing every failure into the placeholder fallback.
    async fn render_or_placeholder(
        &self,
        source: &SourceFile,
        target: TargetBox,
        page: u32,
    ) -> Preview {
        match self.try_render(source, target, page).await {
            Ok(preview) => preview,
            Err(error) => {
                metrics::RENDER_FAILURES.inc();
                error!(
                    path = %source.path.display(),
                    width = target.width,
                    height = target.height,
                    page,
                    %error,
                    "render failed, substituting placeholder"
                );
                self.placeholder(&target)
            }
        }
    }

    fn placeholder(&self, target: &TargetBox) -> Preview {
        metrics::PLACEHOLDERS_SUBSTITUTED.inc();
        placeholder::render(target)
    }

    async fn try_render(
        &self,
        source: &SourceFile,
        target: TargetBox,
        page: u32,
    ) -> Result<Preview, RenderError> {
        let document_format = DocumentFormat::classify(&source.path);
        if document_format == DocumentFormat::Unknown {
            return Err(RenderError::Unsupported(format!(
                "no renderer for {}",
                source.path.display()
            )));
        }

        let preview = match &self.cache {
            Some(cache) => {
                let key = CacheKey {
                    path: source.path.clone(),
                    modified: source.modified,
                    target,
                    page,
                };
                cache
                    .get_or_render(key, || {
                        self.render_uncached(source, document_format, target, page)
                    })
                    .await?
            }
            None => {
                self.render_uncached(source, document_format, target, page)
                    .await?
            }
        };

        metrics::PREVIEWS_RENDERED
            .with_label_values(&[document_format.as_str()])
            .inc();
        Ok(preview)
    }

    /// Read the source and run the renderer on a blocking thread, bounded
    /// by the configured timeout.
    async fn render_uncached(
        &self,
        source: &SourceFile,
        document_format: DocumentFormat,
        target: TargetBox,
        page: u32,
    ) -> Result<Preview, RenderError> {
        let data = self.store.read(&source.path).await.map_err(store_to_render)?;
        let media_type = format::raster_output(&source.path);
        let path = source.path.clone();

        let handle = tokio::task::spawn_blocking(move || match document_format {
            DocumentFormat::RasterImage => raster::render(&data, media_type, &target),
            DocumentFormat::PagedDocument => paged::render(&data, &target, page),
            DocumentFormat::Unknown => Err(RenderError::Unsupported(format!(
                "no renderer for {}",
                path.display()
            ))),
        });

        match tokio::time::timeout(self.render_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => {
                // A panicked renderer is an unexpected failure; it is
                // logged here and absorbed by the fallback upstream.
                warn!(%join_error, "render task did not complete");
                Err(RenderError::Rasterize(format!(
                    "render task failed: {join_error}"
                )))
            }
            Err(_) => {
                // The blocking task cannot be cancelled; its eventual
                // result is discarded.
                Err(RenderError::Timeout(self.render_timeout.as_secs()))
            }
        }
    }
}

fn store_to_render(error: StoreError) -> RenderError {
    match error {
        StoreError::Io(e) => RenderError::Io(e),
        other => RenderError::Io(std::io::Error::other(other.to_string())),
    }
}
