//! Document format classification.
//!
//! Dispatch is driven purely by the lowercase file extension; the file is
//! never opened. Unknown formats route to the placeholder fallback.

use crate::preview::MediaType;
use std::path::Path;

/// Extensions decoded as raster images.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Extensions treated as paginated documents.
const PAGED_EXTENSIONS: &[&str] = &["pdf"];

/// Raster extensions whose previews keep PNG encoding; every other raster
/// source is re-encoded as JPEG.
const PNG_OUTPUT_EXTENSIONS: &[&str] = &["png", "gif"];

/// The renderer family a source file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    RasterImage,
    PagedDocument,
    Unknown,
}

impl DocumentFormat {
    /// Classify a path by its extension.
    pub fn classify(path: &Path) -> Self {
        let Some(ext) = lowercase_extension(path) else {
            return Self::Unknown;
        };
        if RASTER_EXTENSIONS.contains(&ext.as_str()) {
            Self::RasterImage
        } else if PAGED_EXTENSIONS.contains(&ext.as_str()) {
            Self::PagedDocument
        } else {
            Self::Unknown
        }
    }

    /// Short name for logging and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RasterImage => "raster",
            Self::PagedDocument => "paged",
            Self::Unknown => "unknown",
        }
    }
}

/// Output encoding for a raster source, chosen from the source extension
/// rather than any transparency inspection.
pub fn raster_output(path: &Path) -> MediaType {
    match lowercase_extension(path) {
        Some(ext) if PNG_OUTPUT_EXTENSIONS.contains(&ext.as_str()) => MediaType::Png,
        _ => MediaType::Jpeg,
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
