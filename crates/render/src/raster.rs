//! Raster image rendering.

use crate::error::{RenderError, RenderResult};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use vignette_core::{MediaType, Preview, TargetBox};

/// JPEG quality for all JPEG-encoded previews.
pub const JPEG_QUALITY: u8 = 85;

/// Decode a raster source and produce a preview fitted into `bx`.
///
/// The output encoding is chosen by the caller from the source extension;
/// see `vignette_core::format::raster_output`.
pub fn render(data: &[u8], media_type: MediaType, bx: &TargetBox) -> RenderResult<Preview> {
    if data.is_empty() {
        return Err(RenderError::Decode("zero-byte source".to_string()));
    }

    let image = decode(data)?;
    let resized = fit(image, bx);
    encode(&resized, media_type)
}

fn decode(data: &[u8]) -> RenderResult<DynamicImage> {
    let result = match image::guess_format(data) {
        Ok(format) => image::load_from_memory_with_format(data, format),
        Err(_) => image::load_from_memory(data),
    };
    result.map_err(|e| RenderError::Decode(e.to_string()))
}

/// Max-fit `image` into the box, preserving aspect ratio and never
/// upscaling.
pub(crate) fn fit(image: DynamicImage, bx: &TargetBox) -> DynamicImage {
    fit_with(image, bx, FilterType::Triangle)
}

pub(crate) fn fit_with(image: DynamicImage, bx: &TargetBox, filter: FilterType) -> DynamicImage {
    let (out_w, out_h) = bx.fit(image.width(), image.height());
    if out_w < image.width() || out_h < image.height() {
        image.resize(out_w, out_h, filter)
    } else {
        image
    }
}

/// Encode a bitmap as PNG or JPEG (quality 85).
pub(crate) fn encode(image: &DynamicImage, media_type: MediaType) -> RenderResult<Preview> {
    let mut cursor = Cursor::new(Vec::new());
    match media_type {
        MediaType::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb = image.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            encoder
                .encode_image(&rgb)
                .map_err(|e| RenderError::Encode(e.to_string()))?;
        }
        MediaType::Png => {
            image
                .write_to(&mut cursor, ImageFormat::Png)
                .map_err(|e| RenderError::Encode(e.to_string()))?;
        }
    }
    Ok(Preview::new(cursor.into_inner(), media_type))
}
