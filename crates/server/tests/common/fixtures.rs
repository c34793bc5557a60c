//! Test fixtures: synthesized source documents.

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

/// PNG file signature.
#[allow(dead_code)]
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn solid_image(width: u32, height: u32) -> DynamicImage {
    let buffer = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |_x, _y| {
        Rgba([40, 120, 200, 255])
    });
    DynamicImage::ImageRgba8(buffer)
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).expect("encode fixture");
    cursor.into_inner()
}

/// A solid-color PNG of the given dimensions.
#[allow(dead_code)]
pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    encode(&solid_image(width, height), ImageFormat::Png)
}

/// A solid-color JPEG of the given dimensions.
#[allow(dead_code)]
pub fn jpeg_image(width: u32, height: u32) -> Vec<u8> {
    let rgb = DynamicImage::ImageRgb8(solid_image(width, height).to_rgb8());
    encode(&rgb, ImageFormat::Jpeg)
}

/// A solid-color GIF of the given dimensions.
#[allow(dead_code)]
pub fn gif_image(width: u32, height: u32) -> Vec<u8> {
    encode(&solid_image(width, height), ImageFormat::Gif)
}

/// Decode response bytes and return the image dimensions.
#[allow(dead_code)]
pub fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
    let image = image::load_from_memory(bytes).expect("decode response body");
    (image.width(), image.height())
}
