//! Canvas state — the live raster surface every drawing primitive writes
//! into, plus the floating image elements composited above it.
//!
//! The surface is a plain row-major RGB buffer (`image::RgbImage`). There is
//! no compositor readback anywhere: a [`Snapshot`] is a pure memory copy of
//! the composited surface, which is what makes history push/pop cheap and
//! deterministic.

use image::{imageops, imageops::FilterType, Rgb, RgbImage, RgbaImage};
use rayon::prelude::*;
use uuid::Uuid;

/// Default canvas background, matching the stock dark theme.
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([0x25, 0x25, 0x3a]);

/// Default logical canvas size.
pub const DEFAULT_WIDTH: u32 = 960;
pub const DEFAULT_HEIGHT: u32 = 720;

// ============================================================================
// SNAPSHOT
// ============================================================================

/// An immutable capture of the composited canvas at one instant.
///
/// Snapshots are the unit stored in the undo/redo stacks. Once captured they
/// are never mutated; restoring clones the pixels back into the live surface.
#[derive(Clone)]
pub struct Snapshot {
    image: RgbImage,
}

impl Snapshot {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

// ============================================================================
// FLOATING IMAGE ELEMENTS
// ============================================================================

/// An imported or pasted image floating above the base raster.
///
/// Elements stay movable (image tool) until an operation flattens the
/// canvas — restoring a snapshot, flood filling, or a whole-canvas transform
/// all bake elements into the base and drop them.
#[derive(Clone)]
pub struct ImageElement {
    pub id: Uuid,
    /// Top-left corner in logical pixel space. May be negative while the
    /// element hangs off the canvas edge.
    pub x: i32,
    pub y: i32,
    pub image: RgbaImage,
}

impl ImageElement {
    /// Hit test in logical pixel space.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.image.width() as i32
            && y < self.y + self.image.height() as i32
    }
}

// ============================================================================
// CANVAS STATE
// ============================================================================

/// The live editing surface.
///
/// `base` is the raster that brush strokes, shapes, text, and fills write
/// into directly. `elements` float above it and are only ever merged down by
/// [`CanvasState::composite`]. `revision` bumps on every visible change so
/// the shell knows when to re-upload its texture.
pub struct CanvasState {
    width: u32,
    height: u32,
    background: Rgb<u8>,
    base: RgbImage,
    elements: Vec<ImageElement>,
    revision: u64,
}

impl CanvasState {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            background,
            base: RgbImage::from_pixel(width, height, background),
            elements: Vec::new(),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    /// Monotonic change counter; bumps whenever the composited result could
    /// have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn base(&self) -> &RgbImage {
        &self.base
    }

    /// Mutable access to the base raster for drawing primitives.
    pub fn base_mut(&mut self) -> &mut RgbImage {
        self.revision += 1;
        &mut self.base
    }

    /// Changes the background color. Pixels still holding the previous
    /// background are remapped so the canvas reads the same way a recolored
    /// backdrop would: drawn content stays, empty areas take the new color.
    pub fn set_background(&mut self, color: Rgb<u8>) {
        let old = self.background;
        if old == color {
            return;
        }
        for px in self.base.pixels_mut() {
            if *px == old {
                *px = color;
            }
        }
        self.background = color;
        self.revision += 1;
    }

    // ---- floating elements ---------------------------------------------

    pub fn elements(&self) -> &[ImageElement] {
        &self.elements
    }

    pub fn add_element(&mut self, image: RgbaImage, x: i32, y: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.elements.push(ImageElement { id, x, y, image });
        self.revision += 1;
        id
    }

    /// Topmost element under the given logical point.
    pub fn element_at(&self, x: i32, y: i32) -> Option<Uuid> {
        self.elements
            .iter()
            .rev()
            .find(|el| el.contains(x, y))
            .map(|el| el.id)
    }

    pub fn move_element(&mut self, id: Uuid, dx: i32, dy: i32) {
        if let Some(el) = self.elements.iter_mut().find(|el| el.id == id) {
            el.x += dx;
            el.y += dy;
            self.revision += 1;
        }
    }

    // ---- compositing & snapshots -----------------------------------------

    /// Flattens base + floating elements into a fresh RGB raster.
    pub fn composite(&self) -> RgbImage {
        let mut out = self.base.clone();
        if self.elements.is_empty() {
            return out;
        }
        let width = self.width as usize;
        let elements = &self.elements;
        out.par_chunks_mut(width * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for el in elements {
                    blend_element_row(el, y as i32, row, width);
                }
            });
        out
    }

    /// Captures the composited surface. Called before every mutating gesture
    /// and by export.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.composite())
    }

    /// Renders a snapshot as the new live surface, rescaling when the
    /// snapshot was taken at a different canvas size. All floating elements
    /// are discarded — they were flattened into the snapshot at capture time.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width() == self.width && snapshot.height() == self.height {
            self.base = snapshot.image().clone();
        } else {
            self.base = imageops::resize(
                snapshot.image(),
                self.width,
                self.height,
                FilterType::Lanczos3,
            );
        }
        self.elements.clear();
        self.revision += 1;
    }

    /// Replaces the whole surface with `image`, adopting its dimensions.
    /// Used by fills and whole-canvas transforms that operate on a flattened
    /// copy; floating elements are dropped for the same reason as `restore`.
    pub fn set_surface(&mut self, image: RgbImage) {
        self.width = image.width();
        self.height = image.height();
        self.base = image;
        self.elements.clear();
        self.revision += 1;
    }

    /// Wipes the surface back to the background color.
    pub fn clear(&mut self) {
        self.base = RgbImage::from_pixel(self.width, self.height, self.background);
        self.elements.clear();
        self.revision += 1;
    }
}

/// Alpha-blends the slice of `el` crossing row `y` into the row buffer.
fn blend_element_row(el: &ImageElement, y: i32, row: &mut [u8], width: usize) {
    let ey = y - el.y;
    if ey < 0 || ey >= el.image.height() as i32 {
        return;
    }
    for ex in 0..el.image.width() {
        let x = el.x + ex as i32;
        if x < 0 || x >= width as i32 {
            continue;
        }
        let px = el.image.get_pixel(ex, ey as u32);
        let a = px[3] as u32;
        if a == 0 {
            continue;
        }
        let i = x as usize * 3;
        for c in 0..3 {
            let src = px[c] as u32;
            let dst = row[i + c] as u32;
            row[i + c] = ((src * a + dst * (255 - a) + 127) / 255) as u8;
        }
    }
}
