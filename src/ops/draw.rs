//! CPU raster drawing primitives.
//!
//! Strokes are built by stamping brush tips at sub-pixel steps along the
//! segment, so thick lines get proper caps for free. Shapes share one
//! outline/fill path: every shape reduces to a point list, outlines are
//! stroked edge by edge, and fills run through an even-odd scanline pass.

use image::{Rgb, RgbImage};

// ============================================================================
// TOOL GEOMETRY ENUMS
// ============================================================================

/// Shape primitives available to the shape tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Star,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Star => "Star",
        }
    }

    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Line,
            ShapeKind::Rectangle,
            ShapeKind::Circle,
            ShapeKind::Triangle,
            ShapeKind::Star,
        ]
    }
}

/// Brush tip used for freehand strokes and shape outlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushStyle {
    /// Filled disc — round caps.
    Round,
    /// Axis-aligned square — flat caps.
    Square,
    /// Sparse deterministic speckle inside a disc.
    Textured,
}

impl BrushStyle {
    pub fn label(&self) -> &'static str {
        match self {
            BrushStyle::Round => "Round",
            BrushStyle::Square => "Square",
            BrushStyle::Textured => "Textured",
        }
    }

    pub fn all() -> &'static [BrushStyle] {
        &[BrushStyle::Round, BrushStyle::Square, BrushStyle::Textured]
    }
}

// ============================================================================
// BRUSH STAMPS & LINES
// ============================================================================

#[inline]
fn put_pixel_safe(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Positional hash for the textured tip. Deterministic, so redrawing the
/// same stroke produces the same speckle.
fn speckle_hash(x: i32, y: i32) -> u32 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263));
    h ^= h >> 13;
    h = h.wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

/// Stamps one brush tip centered at `(cx, cy)`. `width` is the tip diameter
/// in logical pixels; a width of 1 degenerates to a single pixel.
pub fn stamp_brush(
    img: &mut RgbImage,
    cx: f32,
    cy: f32,
    width: u32,
    style: BrushStyle,
    color: Rgb<u8>,
) {
    // A 1px tip plots the containing pixel directly; the coverage test below
    // would miss every pixel center when the stamp lands on a pixel corner.
    if width <= 1 {
        put_pixel_safe(img, cx.floor() as i32, cy.floor() as i32, color);
        return;
    }

    let radius = width as f32 / 2.0;
    let min_x = (cx - radius).floor() as i32;
    let max_x = (cx + radius).ceil() as i32;
    let min_y = (cy - radius).floor() as i32;
    let max_y = (cy + radius).ceil() as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let inside = match style {
                BrushStyle::Square => {
                    (px - cx).abs() <= radius && (py - cy).abs() <= radius
                }
                BrushStyle::Round => {
                    let dx = px - cx;
                    let dy = py - cy;
                    dx * dx + dy * dy <= radius * radius
                }
                BrushStyle::Textured => {
                    let dx = px - cx;
                    let dy = py - cy;
                    dx * dx + dy * dy <= radius * radius && speckle_hash(x, y) % 100 < 40
                }
            };
            if inside {
                put_pixel_safe(img, x, y, color);
            }
        }
    }
}

/// Draws a stroked segment by stamping tips at ≤1px steps from `a` to `b`.
pub fn draw_line(
    img: &mut RgbImage,
    a: (f32, f32),
    b: (f32, f32),
    width: u32,
    style: BrushStyle,
    color: Rgb<u8>,
) {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < 0.1 {
        stamp_brush(img, a.0, a.1, width, style, color);
        return;
    }

    let steps = distance.ceil() as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_brush(img, a.0 + dx * t, a.1 + dy * t, width, style, color);
    }
}

// ============================================================================
// SHAPE GEOMETRY
// ============================================================================

/// Triangle from a drag bounding box: apex centered on the top edge, base
/// along the bottom edge.
pub fn triangle_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<(f32, f32)> {
    let mid_x = (x1 + x2) / 2.0;
    vec![(x1, y2), (x2, y2), (mid_x, y1)]
}

/// Five-point star inscribed in the drag bounding box.
///
/// Outer radius is half the larger box extent (minimum 5), inner radius is
/// 0.4× outer; the ten vertices alternate outer/inner at 36° steps starting
/// from vertical-up.
pub fn star_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<(f32, f32)> {
    const NUM_POINTS: usize = 5;
    let cx = (x1 + x2) / 2.0;
    let cy = (y1 + y2) / 2.0;
    let mut outer = (x2 - x1).abs().max((y2 - y1).abs()) / 2.0;
    if outer == 0.0 {
        outer = 5.0;
    }
    let inner = outer * 0.4;

    let mut points = Vec::with_capacity(NUM_POINTS * 2);
    for i in 0..NUM_POINTS * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = std::f32::consts::PI / NUM_POINTS as f32 * i as f32
            - std::f32::consts::FRAC_PI_2;
        points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
    }
    points
}

/// Ellipse inscribed in the drag bounding box, sampled as a polyline.
fn ellipse_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<(f32, f32)> {
    const SEGMENTS: usize = 90;
    let cx = (x1 + x2) / 2.0;
    let cy = (y1 + y2) / 2.0;
    let rx = (x2 - x1).abs() / 2.0;
    let ry = (y2 - y1).abs() / 2.0;
    (0..SEGMENTS)
        .map(|i| {
            let a = std::f32::consts::TAU * i as f32 / SEGMENTS as f32;
            (cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

/// Vertex list for a shape dragged from `start` to `end`, plus whether the
/// outline closes back on itself. This single geometry feeds both the dashed
/// preview overlay and the final rasterization.
pub fn shape_points(
    kind: ShapeKind,
    start: (f32, f32),
    end: (f32, f32),
) -> (Vec<(f32, f32)>, bool) {
    let (x1, y1) = start;
    let (x2, y2) = end;
    match kind {
        ShapeKind::Line => (vec![(x1, y1), (x2, y2)], false),
        ShapeKind::Rectangle => (vec![(x1, y1), (x2, y1), (x2, y2), (x1, y2)], true),
        ShapeKind::Circle => (ellipse_points(x1, y1, x2, y2), true),
        ShapeKind::Triangle => (triangle_points(x1, y1, x2, y2), true),
        ShapeKind::Star => (star_points(x1, y1, x2, y2), true),
    }
}

// ============================================================================
// SHAPE RASTERIZATION
// ============================================================================

/// Even-odd scanline fill of an arbitrary polygon.
pub fn fill_polygon(img: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>) {
    if points.len() < 3 {
        return;
    }
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
    let y_start = min_y.floor().max(0.0) as i32;
    let y_end = (max_y.ceil() as i32).min(img.height() as i32 - 1);

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in y_start..=y_end {
        let scan = y as f32 + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % points.len()];
            if (y1 <= scan && scan < y2) || (y2 <= scan && scan < y1) {
                crossings.push(x1 + (scan - y1) * (x2 - x1) / (y2 - y1));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let x_from = pair[0].round() as i32;
            let x_to = pair[1].round() as i32;
            for x in x_from..x_to {
                put_pixel_safe(img, x, y, color);
            }
        }
    }
}

/// Rasterizes a finalized shape: optional solid interior first, stroked
/// outline on top.
pub fn stamp_shape(
    img: &mut RgbImage,
    kind: ShapeKind,
    start: (f32, f32),
    end: (f32, f32),
    stroke_width: u32,
    style: BrushStyle,
    stroke: Rgb<u8>,
    fill: Option<Rgb<u8>>,
) {
    let (points, closed) = shape_points(kind, start, end);

    if let Some(fill_color) = fill {
        if closed {
            fill_polygon(img, &points, fill_color);
        }
    }

    let edges = if closed { points.len() } else { points.len() - 1 };
    for i in 0..edges {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        draw_line(img, a, b, stroke_width, style, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn blank(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, WHITE)
    }

    fn count_colored(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|&&p| p == color).count()
    }

    #[test]
    fn star_yields_ten_alternating_points() {
        let pts = star_points(0.0, 0.0, 100.0, 100.0);
        assert_eq!(pts.len(), 10);

        let (cx, cy) = (50.0, 50.0);
        for (i, (x, y)) in pts.iter().enumerate() {
            let r = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            let expected = if i % 2 == 0 { 50.0 } else { 20.0 };
            assert!((r - expected).abs() < 1e-3, "point {i}: radius {r}");
        }
        // first point faces straight up
        assert!((pts[0].0 - 50.0).abs() < 1e-3);
        assert!((pts[0].1 - 0.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_star_uses_minimum_radius() {
        let pts = star_points(10.0, 10.0, 10.0, 10.0);
        let r = ((pts[0].0 - 10.0).powi(2) + (pts[0].1 - 10.0).powi(2)).sqrt();
        assert!((r - 5.0).abs() < 1e-3);
    }

    #[test]
    fn triangle_has_apex_on_top_edge() {
        let pts = triangle_points(0.0, 0.0, 10.0, 20.0);
        assert_eq!(pts, vec![(0.0, 20.0), (10.0, 20.0), (5.0, 0.0)]);
    }

    #[test]
    fn line_stamp_covers_endpoints() {
        let mut img = blank(20, 20);
        draw_line(&mut img, (2.0, 2.0), (17.0, 17.0), 1, BrushStyle::Round, BLACK);
        assert_eq!(*img.get_pixel(2, 2), BLACK);
        assert_eq!(*img.get_pixel(17, 17), BLACK);
        assert_eq!(*img.get_pixel(10, 10), BLACK);
    }

    #[test]
    fn wide_round_stroke_is_thicker_than_pencil() {
        let mut thin = blank(30, 30);
        let mut thick = blank(30, 30);
        draw_line(&mut thin, (5.0, 15.0), (25.0, 15.0), 1, BrushStyle::Round, BLACK);
        draw_line(&mut thick, (5.0, 15.0), (25.0, 15.0), 9, BrushStyle::Round, BLACK);
        assert!(count_colored(&thick, BLACK) > 4 * count_colored(&thin, BLACK));
    }

    #[test]
    fn square_tip_fills_corners_round_tip_does_not() {
        let mut round = blank(21, 21);
        let mut square = blank(21, 21);
        stamp_brush(&mut round, 10.5, 10.5, 11, BrushStyle::Round, BLACK);
        stamp_brush(&mut square, 10.5, 10.5, 11, BrushStyle::Square, BLACK);
        assert!(count_colored(&square, BLACK) > count_colored(&round, BLACK));
        assert_eq!(*square.get_pixel(5, 5), BLACK);
    }

    #[test]
    fn textured_tip_is_sparse_and_deterministic() {
        let mut a = blank(30, 30);
        let mut b = blank(30, 30);
        stamp_brush(&mut a, 15.0, 15.0, 20, BrushStyle::Textured, BLACK);
        stamp_brush(&mut b, 15.0, 15.0, 20, BrushStyle::Textured, BLACK);
        let mut solid = blank(30, 30);
        stamp_brush(&mut solid, 15.0, 15.0, 20, BrushStyle::Round, BLACK);

        let sparse = count_colored(&a, BLACK);
        assert!(sparse > 0);
        assert!(sparse < count_colored(&solid, BLACK));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn filled_rectangle_covers_interior() {
        let mut img = blank(20, 20);
        stamp_shape(
            &mut img,
            ShapeKind::Rectangle,
            (4.0, 4.0),
            (15.0, 15.0),
            1,
            BrushStyle::Round,
            BLACK,
            Some(Rgb([255, 0, 0])),
        );
        assert_eq!(*img.get_pixel(9, 9), Rgb([255, 0, 0]));
        // outline sits on top of the fill
        assert_eq!(*img.get_pixel(4, 4), BLACK);
        // outside untouched
        assert_eq!(*img.get_pixel(1, 1), WHITE);
    }

    #[test]
    fn polygon_fill_stays_inside_bounds() {
        let mut img = blank(10, 10);
        fill_polygon(
            &mut img,
            &[(-5.0, -5.0), (15.0, -5.0), (15.0, 15.0), (-5.0, 15.0)],
            BLACK,
        );
        assert_eq!(count_colored(&img, BLACK), 100);
    }

    #[test]
    fn open_line_shape_has_no_fill() {
        let mut img = blank(20, 20);
        stamp_shape(
            &mut img,
            ShapeKind::Line,
            (0.0, 0.0),
            (19.0, 0.0),
            1,
            BrushStyle::Round,
            BLACK,
            Some(Rgb([255, 0, 0])),
        );
        assert_eq!(count_colored(&img, Rgb([255, 0, 0])), 0);
    }
}
