//! Text tool rasterization — glyph layout and coverage blending via ab_glyph.

use std::fs;

use ab_glyph::{point, Font, FontArc, ScaleFont};
use image::{Rgb, RgbImage};
use log::warn;

use crate::error::{Error, Result};

/// Default font size offered by the text prompt.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Well-known system font locations, boldest first. The text tool needs one
/// real font file; which one is cosmetic.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-fonts/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the first usable system font. A miss is non-fatal for the
/// application — the text tool reports it and declines to stamp.
pub fn load_default_font() -> Result<FontArc> {
    for path in FONT_CANDIDATES {
        match fs::read(path) {
            Ok(bytes) => match FontArc::try_from_vec(bytes) {
                Ok(font) => return Ok(font),
                Err(err) => warn!("unusable font {path}: {err}"),
            },
            Err(_) => continue,
        }
    }
    Err(Error::NoFont)
}

/// Stamps `text` into the raster, anchored at top-left `(x, y)` in logical
/// pixels. Handles multi-line input via `\n`; glyph coverage is blended so
/// edges stay smooth against the existing pixels.
pub fn stamp_text(
    img: &mut RgbImage,
    font: &FontArc,
    text: &str,
    size: f32,
    x: f32,
    y: f32,
    color: Rgb<u8>,
) {
    let scaled = font.as_scaled(size);
    let ascent = scaled.ascent();
    let line_height = scaled.height() + scaled.line_gap();

    for (line_idx, line) in text.split('\n').enumerate() {
        let baseline_y = y + ascent + line_idx as f32 * line_height;
        let mut cursor_x = x;
        let mut last_glyph = None;

        for ch in line.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = last_glyph {
                cursor_x += scaled.kern(prev, glyph_id);
            }
            let glyph = glyph_id.with_scale_and_position(size, point(cursor_x, baseline_y));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    blend_pixel(img, px, py, color, coverage);
                });
            }
            cursor_x += scaled.h_advance(glyph_id);
            last_glyph = Some(glyph_id);
        }
    }
}

fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let dst = px[c] as f32;
        px[c] = (dst + (color[c] as f32 - dst) * coverage).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    // Stamping needs a real font file; skip quietly on hosts without one so
    // the suite stays machine-independent.
    fn test_font() -> Option<FontArc> {
        load_default_font().ok()
    }

    #[test]
    fn stamp_darkens_pixels_near_anchor() {
        let Some(font) = test_font() else { return };
        let mut img = RgbImage::from_pixel(120, 40, WHITE);
        stamp_text(&mut img, &font, "Hi", 24.0, 4.0, 4.0, BLACK);

        let touched = img.pixels().filter(|&&p| p != WHITE).count();
        assert!(touched > 20, "only {touched} pixels written");
    }

    #[test]
    fn stamp_clips_at_buffer_edges() {
        let Some(font) = test_font() else { return };
        let mut img = RgbImage::from_pixel(10, 10, WHITE);
        // Anchored mostly outside; must not panic and must stay in bounds.
        stamp_text(&mut img, &font, "Wide text", 30.0, -40.0, -10.0, BLACK);
    }

    #[test]
    fn multiline_advances_downward() {
        let Some(font) = test_font() else { return };
        let mut one = RgbImage::from_pixel(80, 120, WHITE);
        let mut two = RgbImage::from_pixel(80, 120, WHITE);
        stamp_text(&mut one, &font, "a", 20.0, 2.0, 2.0, BLACK);
        stamp_text(&mut two, &font, "a\na", 20.0, 2.0, 2.0, BLACK);

        let lowest = |img: &RgbImage| {
            img.enumerate_pixels()
                .filter(|(_, _, &p)| p != WHITE)
                .map(|(_, y, _)| y)
                .max()
                .unwrap_or(0)
        };
        assert!(lowest(&two) > lowest(&one));
    }
}
