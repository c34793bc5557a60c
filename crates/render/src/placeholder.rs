//! Placeholder rendering.
//!
//! Synthesizes the generic "unavailable" icon: a flat background with a
//! centered document glyph (sheet outline, folded corner, rule lines)
//! sized relative to the shorter box side. This is the universal fallback
//! and the only renderer that cannot fail.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use vignette_core::{MediaType, Preview, TargetBox};

const BACKGROUND: Rgba<u8> = Rgba([0xEC, 0xED, 0xEF, 0xFF]);
const GLYPH: Rgba<u8> = Rgba([0x9A, 0xA0, 0xA8, 0xFF]);
const SHEET: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Minimal valid 1x1 PNG, the last-resort body should in-memory PNG
/// encoding ever fail.
const MINIMAL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, // 8-bit RGB + CRC
    0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT
    0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, // data
    0x00, 0x02, 0x00, 0x01, 0xE2, 0x21, 0xBC, 0x33, // CRC
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND
];

/// Render the placeholder at exactly the box's nominal dimensions.
pub fn render(bx: &TargetBox) -> Preview {
    let (width, height) = (bx.width, bx.height);
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    draw_document_glyph(&mut canvas);

    let mut cursor = Cursor::new(Vec::new());
    if DynamicImage::ImageRgba8(canvas)
        .write_to(&mut cursor, ImageFormat::Png)
        .is_err()
    {
        return Preview::new(MINIMAL_PNG.to_vec(), MediaType::Png);
    }
    Preview::new(cursor.into_inner(), MediaType::Png)
}

fn draw_document_glyph(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let glyph = width.min(height) * 3 / 5;
    if glyph < 8 {
        return;
    }

    let sheet_h = glyph;
    let sheet_w = glyph * 3 / 4;
    let x0 = (width - sheet_w) / 2;
    let y0 = (height - sheet_h) / 2;
    let stroke = (glyph / 24).max(1);
    let fold = sheet_w / 3;

    // Sheet outline with white fill.
    fill_rect(canvas, x0, y0, sheet_w, sheet_h, GLYPH);
    fill_rect(
        canvas,
        x0 + stroke,
        y0 + stroke,
        sheet_w - 2 * stroke,
        sheet_h - 2 * stroke,
        SHEET,
    );

    // Folded top-right corner: cut the corner back to the background,
    // then draw the diagonal crease.
    for i in 0..fold {
        let run = fold - i;
        fill_rect(canvas, x0 + sheet_w - run, y0 + i, run, 1, BACKGROUND);
    }
    for i in 0..fold {
        fill_rect(canvas, x0 + sheet_w - fold + i, y0 + i, 1, stroke, GLYPH);
    }

    // Rule lines.
    let inset = sheet_w / 5;
    let line_w = sheet_w - 2 * inset;
    for step in 1..=3u32 {
        let y = y0 + sheet_h * step / 5 + fold / 2;
        fill_rect(canvas, x0 + inset, y, line_w, stroke, GLYPH);
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x1 = x.saturating_add(w).min(canvas.width());
    let y1 = y.saturating_add(h).min(canvas.height());
    for yy in y.min(y1)..y1 {
        for xx in x.min(x1)..x1 {
            canvas.put_pixel(xx, yy, color);
        }
    }
}
