//! Image import and export.
//!
//! Import brings a file in as a floating element scaled to fit the canvas;
//! export flattens and encodes by extension. WebP decodes on import but has
//! no export path, so asking for a `.webp` output is an error rather than a
//! silently substituted format.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, ColorType, DynamicImage, ImageFormat, RgbaImage};
use log::info;
use rfd::FileDialog;
use uuid::Uuid;

use crate::canvas::CanvasState;
use crate::error::{Error, Result};

/// Imported images are scaled down to at most this fraction of the canvas.
const IMPORT_MAX_FRACTION: f32 = 0.8;

/// Extensions offered by the open/import dialog.
pub const OPEN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "bmp", "gif", "tga", "tiff", "tif", "ico",
];

// ============================================================================
// SAVE FORMATS
// ============================================================================

/// Encodable output formats, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tga,
    Tiff,
    Ico,
}

impl SaveFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "gif" => Some(SaveFormat::Gif),
            "tga" => Some(SaveFormat::Tga),
            "tiff" | "tif" => Some(SaveFormat::Tiff),
            "ico" => Some(SaveFormat::Ico),
            _ => None,
        }
    }

    /// Resolves the output format from a path, surfacing a missing or
    /// unencodable extension as an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::MissingExtension(path.to_path_buf()))?;
        Self::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat(ext.to_lowercase()))
    }
}

// ============================================================================
// IMPORT
// ============================================================================

/// Decodes any supported file to RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Decodes a file straight into an opaque surface, for opening as a canvas.
pub fn load_as_surface(path: &Path) -> Result<image::RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Imports a file as a floating element: scaled down (preserving aspect) so
/// it covers at most 80% of the canvas in either direction, then centered.
/// The caller records history first.
pub fn import_into(canvas: &mut CanvasState, path: &Path) -> Result<Uuid> {
    let decoded = load_image(path)?;
    let max_w = ((canvas.width() as f32 * IMPORT_MAX_FRACTION) as u32).max(1);
    let max_h = ((canvas.height() as f32 * IMPORT_MAX_FRACTION) as u32).max(1);

    let scaled = if decoded.width() > max_w || decoded.height() > max_h {
        DynamicImage::ImageRgba8(decoded)
            .thumbnail(max_w, max_h)
            .to_rgba8()
    } else {
        decoded
    };

    let x = (canvas.width() as i32 - scaled.width() as i32) / 2;
    let y = (canvas.height() as i32 - scaled.height() as i32) / 2;
    info!(
        "imported {} as {}x{} element",
        path.display(),
        scaled.width(),
        scaled.height()
    );
    Ok(canvas.add_element(scaled, x, y))
}

// ============================================================================
// EXPORT
// ============================================================================

/// Flattens the canvas and encodes it at `path`, format from the extension.
pub fn export(canvas: &CanvasState, path: &Path) -> Result<()> {
    let format = SaveFormat::from_path(path)?;
    let flat = canvas.composite();
    let (w, h) = (flat.width(), flat.height());

    match format {
        SaveFormat::Png | SaveFormat::Jpeg | SaveFormat::Bmp | SaveFormat::Tga
        | SaveFormat::Tiff => {
            let fmt = match format {
                SaveFormat::Png => ImageFormat::Png,
                SaveFormat::Jpeg => ImageFormat::Jpeg,
                SaveFormat::Bmp => ImageFormat::Bmp,
                SaveFormat::Tga => ImageFormat::Tga,
                _ => ImageFormat::Tiff,
            };
            image::save_buffer_with_format(path, flat.as_raw(), w, h, ColorType::Rgb8, fmt)?;
        }
        SaveFormat::Gif => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            DynamicImage::ImageRgb8(flat)
                .write_to(&mut writer, image::ImageOutputFormat::Gif)?;
        }
        SaveFormat::Ico => {
            // ICO entries are limited to 256x256; scale down when necessary
            let dyn_img = if w > 256 || h > 256 {
                let scale = 256.0 / w.max(h) as f32;
                let new_w = ((w as f32 * scale) as u32).max(1);
                let new_h = ((h as f32 * scale) as u32).max(1);
                DynamicImage::ImageRgb8(image::imageops::resize(
                    &flat,
                    new_w,
                    new_h,
                    FilterType::Lanczos3,
                ))
            } else {
                DynamicImage::ImageRgb8(flat)
            };
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            dyn_img
                .to_rgba8()
                .write_to(&mut writer, image::ImageOutputFormat::Ico)?;
        }
    }
    info!("exported canvas to {}", path.display());
    Ok(())
}

/// Headless conversion used by the CLI: decode `input`, re-encode at
/// `output` per its extension.
pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let surface = load_as_surface(input)?;
    let mut canvas = CanvasState::new(surface.width(), surface.height(), crate::canvas::DEFAULT_BACKGROUND);
    canvas.set_surface(surface);
    export(&canvas, output)
}

// ============================================================================
// FILE DIALOGS
// ============================================================================

pub fn pick_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", OPEN_EXTENSIONS)
        .pick_file()
}

pub fn pick_export_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .add_filter("BMP", &["bmp"])
        .add_filter("GIF", &["gif"])
        .add_filter("TGA", &["tga"])
        .add_filter("TIFF", &["tiff", "tif"])
        .add_filter("ICO", &["ico"])
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("paint-studio-test-{}-{name}", Uuid::new_v4()))
    }

    #[test]
    fn format_detection_is_case_insensitive() {
        assert_eq!(SaveFormat::from_extension("PNG"), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_extension("JpEg"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("tif"), Some(SaveFormat::Tiff));
    }

    #[test]
    fn webp_is_import_only() {
        assert_eq!(SaveFormat::from_extension("webp"), None);
        let err = SaveFormat::from_path(Path::new("out.webp")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ext) if ext == "webp"));
    }

    #[test]
    fn missing_extension_is_an_error() {
        let err = SaveFormat::from_path(Path::new("/tmp/canvas")).unwrap_err();
        assert!(matches!(err, Error::MissingExtension(_)));
    }

    #[test]
    fn png_export_roundtrips_pixels() {
        let mut canvas = CanvasState::new(8, 8, Rgb([255, 255, 255]));
        canvas.base_mut().put_pixel(3, 4, Rgb([255, 0, 0]));
        let path = temp_path("roundtrip.png");

        export(&canvas, &path).unwrap();
        let back = load_as_surface(&path).unwrap();
        assert_eq!((back.width(), back.height()), (8, 8));
        assert_eq!(*back.get_pixel(3, 4), Rgb([255, 0, 0]));
        assert_eq!(*back.get_pixel(0, 0), Rgb([255, 255, 255]));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn import_scales_oversized_images_and_centers() {
        // a 100x100 source into a 50x50 canvas must land at <= 40px
        let src = temp_path("big.png");
        image::RgbImage::from_pixel(100, 100, Rgb([0, 128, 0]))
            .save(&src)
            .unwrap();

        let mut canvas = CanvasState::new(50, 50, Rgb([255, 255, 255]));
        import_into(&mut canvas, &src).unwrap();

        let el = &canvas.elements()[0];
        assert!(el.image.width() <= 40);
        assert!(el.image.height() <= 40);
        // centered: symmetric margins
        assert_eq!(el.x, (50 - el.image.width() as i32) / 2);
        assert_eq!(el.y, (50 - el.image.height() as i32) / 2);
        std::fs::remove_file(&src).ok();
    }

    #[test]
    fn small_imports_keep_their_size() {
        let src = temp_path("small.png");
        image::RgbImage::from_pixel(10, 6, Rgb([0, 0, 255]))
            .save(&src)
            .unwrap();

        let mut canvas = CanvasState::new(50, 50, Rgb([255, 255, 255]));
        import_into(&mut canvas, &src).unwrap();
        let el = &canvas.elements()[0];
        assert_eq!((el.image.width(), el.image.height()), (10, 6));
        std::fs::remove_file(&src).ok();
    }

    #[test]
    fn headless_convert_changes_container() {
        let src = temp_path("in.png");
        let dst = temp_path("out.bmp");
        image::RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
            .save(&src)
            .unwrap();

        convert(&src, &dst).unwrap();
        let back = load_as_surface(&dst).unwrap();
        assert_eq!(*back.get_pixel(0, 0), Rgb([10, 20, 30]));
        std::fs::remove_file(&src).ok();
        std::fs::remove_file(&dst).ok();
    }
}
