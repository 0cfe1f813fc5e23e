//! Zoom state and screen ↔ logical pixel coordinate mapping.
//!
//! Two zoom entry points exist on purpose and behave differently, mirroring
//! the behavior this replaces: the wheel/keyboard path steps multiplicatively
//! (±10% per notch) and can never hit zero from a positive level, while the
//! preset-level path maps a 0% selection to a 0.01 factor, decaying toward a
//! degenerate near-zero zoom instead of reaching it. `apply_zoom` itself
//! clamps at `max(0, zoom * factor)`. See DESIGN.md for the flagged
//! asymmetry.

/// Multiplicative step for one wheel notch (±10%).
pub const WHEEL_STEP: f32 = 1.1;

/// Zoom-out factor for a secondary click with the zoom tool.
pub const SECONDARY_ZOOM_OUT: f32 = 1.0 / 1.2;

/// Preset zoom levels offered by the view menu, in percent.
pub const ZOOM_PRESETS: &[u32] = &[0, 25, 50, 100, 200, 300, 400, 500];

#[derive(Clone, Copy, Debug)]
pub struct CanvasTransform {
    zoom: f32,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl CanvasTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current zoom factor (1.0 = 100%).
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_percent(&self) -> f32 {
        self.zoom * 100.0
    }

    /// Rescales the view by `factor`, clamping the result at zero.
    pub fn apply_zoom(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).max(0.0);
    }

    /// One wheel notch: +10% for scroll up, -10% for scroll down.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.apply_zoom(WHEEL_STEP);
        } else if delta < 0.0 {
            self.apply_zoom(1.0 / WHEEL_STEP);
        }
    }

    /// Jumps to a preset zoom level given in percent.
    ///
    /// A 0% target does not zero the level outright; it applies a 0.01
    /// factor, the degenerate-minimum behavior of the level selector this
    /// reimplements. A zoom that somehow already sits at 0 recovers by
    /// adopting the target directly.
    pub fn set_level_percent(&mut self, percent: f32) {
        let target = (percent / 100.0).max(0.0);
        if self.zoom <= 0.0 {
            self.zoom = target;
            return;
        }
        let factor = if target > 0.0 { target / self.zoom } else { 0.01 };
        self.apply_zoom(factor);
    }

    /// Maps a screen-space canvas coordinate to logical pixel space.
    ///
    /// Returns `None` for a degenerate zoom, which callers report as
    /// out-of-bounds rather than dividing by zero.
    pub fn screen_to_logical(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.zoom <= 0.0 {
            return None;
        }
        Some((x / self.zoom, y / self.zoom))
    }

    /// Maps a logical pixel coordinate back to screen space.
    pub fn logical_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.zoom, y * self.zoom)
    }
}
