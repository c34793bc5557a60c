//! Paginated document rendering.
//!
//! The two-stage pipeline rasterizes one page at a fixed base resolution
//! (the dominant cost), then rescales that bitmap into the target box.
//! Pdfium is bound per call: the upstream types are `!Send`, and each
//! render runs on its own blocking thread.

use crate::error::{RenderError, RenderResult};
use crate::raster;
use image::imageops::FilterType;
use pdfium_render::prelude::*;
use tracing::debug;
use vignette_core::{MediaType, Preview, TargetBox};

/// Base rasterization resolution, in dots per inch.
pub const BASE_DPI: u32 = 96;

/// PDF point size: 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Hard cap on either side of the base page raster, pre-rescale. Bounds
/// memory on degenerate page geometries.
const MAX_RASTER_DIMENSION: u32 = 4096;

/// Rasterize one page of a paginated document and fit it into `bx`.
///
/// The requested `page` is 1-based and clamped into the document's page
/// range. Paged previews are always JPEG-encoded.
pub fn render(data: &[u8], bx: &TargetBox, page: u32) -> RenderResult<Preview> {
    let pdfium = Pdfium::new(
        Pdfium::bind_to_system_library().map_err(|e| RenderError::Engine(e.to_string()))?,
    );
    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| RenderError::Decode(format!("failed to parse document: {e}")))?;

    let pages = document.pages();
    let page_count = pages.len();
    if page_count == 0 {
        return Err(RenderError::EmptyDocument);
    }

    let index = clamp_page(page, page_count);
    let pdf_page = pages
        .get(index)
        .map_err(|e| RenderError::Rasterize(format!("page {index} unavailable: {e}")))?;

    let (base_w, base_h) =
        base_raster_size(pdf_page.width().value, pdf_page.height().value, BASE_DPI);
    let config = PdfRenderConfig::new()
        .set_target_width(base_w as i32)
        .set_maximum_height(base_h as i32);

    let bitmap = pdf_page
        .render_with_config(&config)
        .map_err(|e| RenderError::Rasterize(e.to_string()))?;
    let page_image = bitmap.as_image();

    debug!(
        page = index + 1,
        page_count,
        base_width = base_w,
        base_height = base_h,
        "rasterized document page"
    );

    let resized = raster::fit_with(page_image, bx, FilterType::CatmullRom);
    raster::encode(&resized, MediaType::Jpeg)
}

/// Clamp a 1-based page request into `[1, page_count]` and convert to a
/// 0-based index.
pub(crate) fn clamp_page(page: u32, page_count: u16) -> u16 {
    let clamped = page.clamp(1, page_count as u32);
    (clamped - 1) as u16
}

/// Pixel dimensions for the base page raster at `dpi`, capped to
/// `MAX_RASTER_DIMENSION` on the longer side while preserving the page
/// ratio.
pub(crate) fn base_raster_size(width_points: f32, height_points: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let raw_w = (width_points * scale).max(1.0);
    let raw_h = (height_points * scale).max(1.0);

    let longest = raw_w.max(raw_h);
    if longest > MAX_RASTER_DIMENSION as f32 {
        let ratio = MAX_RASTER_DIMENSION as f32 / longest;
        (
            ((raw_w * ratio) as u32).clamp(1, MAX_RASTER_DIMENSION),
            ((raw_h * ratio) as u32).clamp(1, MAX_RASTER_DIMENSION),
        )
    } else {
        (raw_w as u32, raw_h as u32)
    }
}
