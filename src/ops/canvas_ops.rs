//! Whole-canvas operations: resize, rotate, flip, fit-to-view.
//!
//! All of these flatten the canvas first (floating elements get baked in)
//! and then rebuild the surface; callers record history before invoking.

use image::{imageops, imageops::FilterType};

use crate::canvas::{CanvasState, Snapshot};
use crate::error::{Error, Result};

/// Hard ceiling on either canvas dimension; above this a resize is refused
/// rather than letting a typo allocate gigabytes.
pub const MAX_DIMENSION: i64 = 16_384;

/// Smallest canvas produced by fit-to-view.
pub const MIN_FIT_SIZE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn label(&self) -> &'static str {
        match self {
            Rotation::Cw90 => "Rotate 90°",
            Rotation::Cw180 => "Rotate 180°",
            Rotation::Cw270 => "Rotate 270°",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

impl FlipDirection {
    pub fn label(&self) -> &'static str {
        match self {
            FlipDirection::Horizontal => "Flip Horizontal",
            FlipDirection::Vertical => "Flip Vertical",
        }
    }
}

/// Validates the raw strings from the resize dialog. Malformed or
/// non-positive input is an error; nothing is mutated on failure.
pub fn parse_dimensions(width: &str, height: &str) -> Result<(u32, u32)> {
    let w: i64 = width
        .trim()
        .parse()
        .map_err(|_| Error::BadNumericInput(width.to_string()))?;
    let h: i64 = height
        .trim()
        .parse()
        .map_err(|_| Error::BadNumericInput(height.to_string()))?;
    if w <= 0 || h <= 0 || w > MAX_DIMENSION || h > MAX_DIMENSION {
        return Err(Error::InvalidDimensions { width: w, height: h });
    }
    Ok((w as u32, h as u32))
}

/// Rescales the flattened canvas to new logical dimensions.
pub fn resize_canvas(canvas: &mut CanvasState, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    let resized = imageops::resize(&canvas.composite(), width, height, FilterType::Lanczos3);
    canvas.set_surface(resized);
    Ok(())
}

/// Rotates the flattened canvas. Logical dimensions stay fixed; a 90°/270°
/// result on a non-square canvas is rescaled back into them, the same way
/// the restored snapshot path always rescales to the live size.
pub fn rotate_canvas(canvas: &mut CanvasState, rotation: Rotation) {
    let flat = canvas.composite();
    let rotated = match rotation {
        Rotation::Cw90 => imageops::rotate90(&flat),
        Rotation::Cw180 => imageops::rotate180(&flat),
        Rotation::Cw270 => imageops::rotate270(&flat),
    };
    canvas.restore(&Snapshot::new(rotated));
}

/// Mirrors the flattened canvas in place.
pub fn flip_canvas(canvas: &mut CanvasState, direction: FlipDirection) {
    let flat = canvas.composite();
    let flipped = match direction {
        FlipDirection::Horizontal => imageops::flip_horizontal(&flat),
        FlipDirection::Vertical => imageops::flip_vertical(&flat),
    };
    canvas.restore(&Snapshot::new(flipped));
}

/// Rescales the canvas to the available viewport area, clamped to a sane
/// minimum.
pub fn fit_canvas(canvas: &mut CanvasState, avail_width: u32, avail_height: u32) -> Result<()> {
    resize_canvas(
        canvas,
        avail_width.max(MIN_FIT_SIZE),
        avail_height.max(MIN_FIT_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn parse_rejects_garbage_and_nonpositive() {
        assert!(parse_dimensions("abc", "100").is_err());
        assert!(parse_dimensions("100", "12.5").is_err());
        assert!(parse_dimensions("0", "100").is_err());
        assert!(parse_dimensions("-3", "100").is_err());
        assert!(parse_dimensions("100", &format!("{}", MAX_DIMENSION + 1)).is_err());
        assert_eq!(parse_dimensions(" 640 ", "480").unwrap(), (640, 480));
    }

    #[test]
    fn resize_adopts_new_dimensions() {
        let mut canvas = CanvasState::new(8, 8, RED);
        resize_canvas(&mut canvas, 16, 4).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (16, 4));
        // solid color survives rescaling exactly
        assert!(canvas.base().pixels().all(|&p| p == RED));
    }

    #[test]
    fn rotate_square_canvas_moves_corner_pixel() {
        let mut canvas = CanvasState::new(4, 4, WHITE);
        canvas.base_mut().put_pixel(0, 0, RED);

        rotate_canvas(&mut canvas, Rotation::Cw90);
        assert_eq!(*canvas.base().get_pixel(3, 0), RED);
        assert_eq!(*canvas.base().get_pixel(0, 0), WHITE);
    }

    #[test]
    fn rotate_keeps_logical_dimensions() {
        let mut canvas = CanvasState::new(6, 3, WHITE);
        rotate_canvas(&mut canvas, Rotation::Cw90);
        assert_eq!((canvas.width(), canvas.height()), (6, 3));
    }

    #[test]
    fn flip_horizontal_mirrors_pixels() {
        let mut canvas = CanvasState::new(4, 2, WHITE);
        canvas.base_mut().put_pixel(0, 1, RED);

        flip_canvas(&mut canvas, FlipDirection::Horizontal);
        assert_eq!(*canvas.base().get_pixel(3, 1), RED);
        assert_eq!(*canvas.base().get_pixel(0, 1), WHITE);
    }

    #[test]
    fn fit_clamps_to_minimum() {
        let mut canvas = CanvasState::new(500, 500, WHITE);
        fit_canvas(&mut canvas, 10, 2000).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (MIN_FIT_SIZE, 2000));
    }
}
