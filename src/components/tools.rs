//! Tool dispatch — maps pointer gestures on the canvas to edits.
//!
//! The shell translates raw input into [`PointerEvent`]s in screen space;
//! everything past that point happens here in logical pixel space. One
//! [`ToolManager`] owns the active tool, the in-flight gesture, the internal
//! clipboard, and the pending text prompt, and is the only writer that pairs
//! canvas mutations with history recordings.

use ab_glyph::FontArc;
use image::{Rgb, RgbaImage};

use crate::canvas::CanvasState;
use crate::components::history::History;
use crate::ops::draw::{self, BrushStyle, ShapeKind};
use crate::ops::fill::{flood_fill, FillOutcome};
use crate::ops::text::stamp_text;
use crate::transform::{CanvasTransform, SECONDARY_ZOOM_OUT};

/// Zoom-in factor for a primary click with the zoom tool.
const PRIMARY_ZOOM_IN: f32 = 1.2;

// ============================================================================
// TOOL SELECTION
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Pencil,
    Eraser,
    Fill,
    Text,
    ColorPick,
    Zoom,
    Shape,
    ImageMove,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
            Tool::Text => "Text",
            Tool::ColorPick => "Color Picker",
            Tool::Zoom => "Zoom",
            Tool::Shape => "Shape",
            Tool::ImageMove => "Move Image",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[
            Tool::Brush,
            Tool::Pencil,
            Tool::Eraser,
            Tool::Fill,
            Tool::Text,
            Tool::ColorPick,
            Tool::Zoom,
            Tool::Shape,
            Tool::ImageMove,
        ]
    }

    /// Whether a primary gesture with this tool edits pixels. Non-mutating
    /// tools never record history.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Tool::Zoom | Tool::ColorPick)
    }
}

/// Shared stroke settings, edited from the toolbar.
#[derive(Clone, Copy, Debug)]
pub struct ToolProperties {
    pub stroke_color: Rgb<u8>,
    pub fill_color: Rgb<u8>,
    pub brush_size: u32,
    pub brush_style: BrushStyle,
    /// Gates both shape interiors and the fill tool.
    pub fill_enabled: bool,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            stroke_color: Rgb([0, 0, 0]),
            fill_color: Rgb([0, 0, 0]),
            brush_size: 4,
            brush_style: BrushStyle::Round,
            fill_enabled: false,
        }
    }
}

impl ToolProperties {
    /// Interior color for closed shapes, `None` when fill is switched off.
    pub fn active_fill(&self) -> Option<Rgb<u8>> {
        self.fill_enabled.then_some(self.fill_color)
    }
}

// ============================================================================
// POINTER EVENTS & GESTURES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Tertiary,
}

/// One pointer transition, in screen space relative to the canvas origin.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
}

/// In-flight gesture state. Coordinates are logical pixels.
#[derive(Clone, Copy, Debug)]
enum Gesture {
    Idle,
    /// Freehand stroke in progress; `last` is the previous stamp position.
    Drawing { last: (f32, f32) },
    /// Shape drag in progress; nothing is rasterized until release.
    Shaping { start: (f32, f32), current: (f32, f32) },
    /// Dragging a floating image element.
    MovingImage { id: uuid::Uuid, last: (f32, f32) },
}

/// A text insertion waiting on the prompt dialog.
#[derive(Clone, Copy, Debug)]
pub struct PendingText {
    /// Logical anchor of the click.
    pub x: f32,
    pub y: f32,
}

/// Outline data for the dashed drag preview, in logical pixels.
pub struct ShapePreview {
    pub points: Vec<(f32, f32)>,
    pub closed: bool,
    /// Interior color for a translucent fill preview, when fill is enabled
    /// and the outline closes.
    pub fill: Option<Rgb<u8>>,
}

// ============================================================================
// TOOL MANAGER
// ============================================================================

pub struct ToolManager {
    tool: Tool,
    shape: Option<ShapeKind>,
    pub props: ToolProperties,
    gesture: Gesture,
    clipboard: Option<RgbaImage>,
    pending_text: Option<PendingText>,
    status: Option<String>,
    modified: bool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            shape: None,
            props: ToolProperties::default(),
            gesture: Gesture::Idle,
            clipboard: None,
            pending_text: None,
            status: None,
            modified: false,
        }
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn shape(&self) -> Option<ShapeKind> {
        self.shape
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn pending_text(&self) -> Option<PendingText> {
        self.pending_text
    }

    /// Unsaved-changes flag, set by every canvas mutation.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Takes the latest status-bar message, if any.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Switches tools. Leaving the shape tool drops the shape selection and
    /// any in-flight gesture or text prompt.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
        if tool != Tool::Shape {
            self.shape = None;
        }
        self.gesture = Gesture::Idle;
        self.pending_text = None;
    }

    /// Picks a shape primitive; implies the shape tool.
    pub fn select_shape(&mut self, kind: ShapeKind) {
        self.tool = Tool::Shape;
        self.shape = Some(kind);
        self.gesture = Gesture::Idle;
    }

    // ---- pointer dispatch --------------------------------------------------

    pub fn pointer_down(
        &mut self,
        canvas: &mut CanvasState,
        history: &mut History,
        transform: &mut CanvasTransform,
        ev: PointerEvent,
    ) {
        match ev.button {
            PointerButton::Secondary => self.secondary_down(canvas, transform),
            PointerButton::Tertiary => self.paste(canvas, history, transform, ev),
            PointerButton::Primary => self.primary_down(canvas, history, transform, ev),
        }
    }

    pub fn pointer_drag(
        &mut self,
        canvas: &mut CanvasState,
        transform: &CanvasTransform,
        ev: PointerEvent,
    ) {
        let Some((lx, ly)) = transform.screen_to_logical(ev.x, ev.y) else {
            return;
        };
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { last } => {
                let (width, style, color) = self.stroke_params(canvas);
                draw::draw_line(canvas.base_mut(), last, (lx, ly), width, style, color);
                self.gesture = Gesture::Drawing { last: (lx, ly) };
            }
            Gesture::Shaping { start, .. } => {
                self.gesture = Gesture::Shaping { start, current: (lx, ly) };
            }
            Gesture::MovingImage { id, last } => {
                let dx = (lx - last.0).round() as i32;
                let dy = (ly - last.1).round() as i32;
                if dx != 0 || dy != 0 {
                    canvas.move_element(id, dx, dy);
                    self.gesture = Gesture::MovingImage {
                        id,
                        last: (last.0 + dx as f32, last.1 + dy as f32),
                    };
                }
            }
        }
    }

    /// Finalizes the gesture. Shapes rasterize here; strokes already landed
    /// incrementally.
    pub fn pointer_up(&mut self, canvas: &mut CanvasState) {
        if let Gesture::Shaping { start, current } = self.gesture {
            if let Some(kind) = self.shape {
                draw::stamp_shape(
                    canvas.base_mut(),
                    kind,
                    start,
                    current,
                    self.props.brush_size,
                    self.props.brush_style,
                    self.props.stroke_color,
                    self.props.active_fill(),
                );
                self.modified = true;
            }
        }
        self.gesture = Gesture::Idle;
    }

    /// Scroll zoom. Consumed (returns `true`) when the zoom tool is active or
    /// ctrl is held; otherwise the shell keeps the event for panning.
    pub fn wheel(&self, transform: &mut CanvasTransform, delta: f32, ctrl: bool) -> bool {
        if self.tool == Tool::Zoom || ctrl {
            transform.wheel(delta);
            true
        } else {
            false
        }
    }

    /// Live outline for the dashed drag preview.
    pub fn preview(&self) -> Option<ShapePreview> {
        match (self.gesture, self.shape) {
            (Gesture::Shaping { start, current }, Some(kind)) => {
                let (points, closed) = draw::shape_points(kind, start, current);
                let fill = if closed { self.props.active_fill() } else { None };
                Some(ShapePreview { points, closed, fill })
            }
            _ => None,
        }
    }

    // ---- text prompt -------------------------------------------------------

    /// Stamps the prompt result at the recorded anchor. A blank string is
    /// treated as a cancel; returns whether anything was stamped.
    pub fn commit_text(
        &mut self,
        canvas: &mut CanvasState,
        font: &FontArc,
        text: &str,
        size: f32,
    ) -> bool {
        let Some(pending) = self.pending_text.take() else {
            return false;
        };
        if text.trim().is_empty() {
            return false;
        }
        stamp_text(
            canvas.base_mut(),
            font,
            text,
            size,
            pending.x,
            pending.y,
            self.props.stroke_color,
        );
        self.modified = true;
        true
    }

    /// Dismisses the prompt. The history entry recorded at click time stays;
    /// undoing it is a no-op restore.
    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // ---- dispatch internals ------------------------------------------------

    fn primary_down(
        &mut self,
        canvas: &mut CanvasState,
        history: &mut History,
        transform: &mut CanvasTransform,
        ev: PointerEvent,
    ) {
        if self.tool == Tool::Zoom {
            transform.apply_zoom(PRIMARY_ZOOM_IN);
            return;
        }
        let Some((lx, ly)) = transform.screen_to_logical(ev.x, ev.y) else {
            self.set_status("Click inside canvas.");
            return;
        };

        match self.tool {
            Tool::Zoom => {}
            Tool::ColorPick => self.pick_color(canvas, lx, ly),
            Tool::Fill => self.fill_at(canvas, history, lx, ly),
            Tool::Text => {
                history.record_canvas(canvas);
                self.pending_text = Some(PendingText { x: lx, y: ly });
            }
            Tool::ImageMove => {
                if let Some(id) = canvas.element_at(lx as i32, ly as i32) {
                    history.record_canvas(canvas);
                    self.modified = true;
                    self.gesture = Gesture::MovingImage { id, last: (lx, ly) };
                }
            }
            Tool::Shape => match self.shape {
                Some(_) => {
                    history.record_canvas(canvas);
                    self.gesture = Gesture::Shaping {
                        start: (lx, ly),
                        current: (lx, ly),
                    };
                }
                None => self.set_status("Select a shape first."),
            },
            Tool::Brush | Tool::Pencil | Tool::Eraser => {
                history.record_canvas(canvas);
                self.modified = true;
                let (width, style, color) = self.stroke_params(canvas);
                draw::stamp_brush(canvas.base_mut(), lx, ly, width, style, color);
                self.gesture = Gesture::Drawing { last: (lx, ly) };
            }
        }
    }

    fn secondary_down(&mut self, canvas: &CanvasState, transform: &mut CanvasTransform) {
        if self.tool == Tool::Zoom {
            transform.apply_zoom(SECONDARY_ZOOM_OUT);
            return;
        }
        // Copy is read-only: the flattened canvas goes to the internal
        // clipboard and neither the surface nor the history moves.
        let flat = canvas.composite();
        let (w, h) = (flat.width(), flat.height());
        let mut rgba = RgbaImage::new(w, h);
        for (x, y, px) in flat.enumerate_pixels() {
            rgba.put_pixel(x, y, image::Rgba([px[0], px[1], px[2], 255]));
        }
        self.clipboard = Some(rgba);
        self.set_status("Canvas copied.");
    }

    fn paste(
        &mut self,
        canvas: &mut CanvasState,
        history: &mut History,
        transform: &CanvasTransform,
        ev: PointerEvent,
    ) {
        let Some(image) = self.clipboard.clone() else {
            self.set_status("Clipboard is empty.");
            return;
        };
        let Some((lx, ly)) = transform.screen_to_logical(ev.x, ev.y) else {
            self.set_status("Click inside canvas.");
            return;
        };
        history.record_canvas(canvas);
        canvas.add_element(image, lx as i32, ly as i32);
        self.modified = true;
        self.set_status("Canvas pasted.");
    }

    fn pick_color(&mut self, canvas: &CanvasState, lx: f32, ly: f32) {
        let (x, y) = (lx as i32, ly as i32);
        if !canvas.in_bounds(x, y) {
            self.set_status("Click inside canvas.");
            return;
        }
        let sampled = *canvas.composite().get_pixel(x as u32, y as u32);
        self.props.stroke_color = sampled;
        if self.props.fill_enabled {
            self.props.fill_color = sampled;
        }
        self.set_status(format!(
            "Picked color #{:02x}{:02x}{:02x}.",
            sampled[0], sampled[1], sampled[2]
        ));
    }

    fn fill_at(&mut self, canvas: &mut CanvasState, history: &mut History, lx: f32, ly: f32) {
        if !self.props.fill_enabled {
            self.set_status("Enable 'Fill' to use this tool.");
            return;
        }
        // The fill runs on a flattened copy; the pre-fill copy doubles as the
        // history entry, so exactly one snapshot is recorded per click.
        let before = canvas.snapshot();
        let mut flat = before.image().clone();
        match flood_fill(&mut flat, (lx as i32, ly as i32), self.props.fill_color) {
            FillOutcome::Filled { .. } => {
                history.record(before);
                canvas.set_surface(flat);
                self.modified = true;
                self.set_status("Area filled.");
            }
            FillOutcome::AlreadyFilled => {
                self.set_status("Already filled with this color.");
            }
            FillOutcome::OutOfBounds => {
                self.set_status("Click inside canvas.");
            }
        }
    }

    /// Width, tip, and color of the active freehand tool. The eraser paints
    /// the background color; the pencil is a fixed 1px round tip.
    fn stroke_params(&self, canvas: &CanvasState) -> (u32, BrushStyle, Rgb<u8>) {
        match self.tool {
            Tool::Pencil => (1, BrushStyle::Round, self.props.stroke_color),
            Tool::Eraser => (
                self.props.brush_size,
                BrushStyle::Round,
                canvas.background(),
            ),
            _ => (
                self.props.brush_size,
                self.props.brush_style,
                self.props.stroke_color,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    struct Rig {
        canvas: CanvasState,
        history: History,
        transform: CanvasTransform,
        tools: ToolManager,
    }

    fn rig() -> Rig {
        Rig {
            canvas: CanvasState::new(20, 20, WHITE),
            history: History::default(),
            transform: CanvasTransform::new(),
            tools: ToolManager::new(),
        }
    }

    fn press(r: &mut Rig, x: f32, y: f32, button: PointerButton) {
        let ev = PointerEvent { x, y, button };
        r.tools
            .pointer_down(&mut r.canvas, &mut r.history, &mut r.transform, ev);
    }

    fn drag(r: &mut Rig, x: f32, y: f32) {
        let ev = PointerEvent { x, y, button: PointerButton::Primary };
        r.tools.pointer_drag(&mut r.canvas, &r.transform, ev);
    }

    #[test]
    fn selecting_a_shape_forces_the_shape_tool() {
        let mut tools = ToolManager::new();
        tools.select_shape(ShapeKind::Star);
        assert_eq!(tools.tool(), Tool::Shape);
        assert_eq!(tools.shape(), Some(ShapeKind::Star));

        // and leaving the shape tool drops the selection
        tools.select_tool(Tool::Brush);
        assert_eq!(tools.shape(), None);
    }

    #[test]
    fn brush_stroke_paints_records_history_and_flags_modified() {
        let mut r = rig();
        r.tools.select_tool(Tool::Pencil);

        press(&mut r, 2.0, 2.0, PointerButton::Primary);
        drag(&mut r, 8.0, 2.0);
        r.tools.pointer_up(&mut r.canvas);

        assert_eq!(*r.canvas.base().get_pixel(2, 2), BLACK);
        assert_eq!(*r.canvas.base().get_pixel(8, 2), BLACK);
        assert!(r.tools.is_modified());
        assert_eq!(r.history.undo_depth(), 1);

        assert!(r.history.undo_canvas(&mut r.canvas));
        assert_eq!(*r.canvas.base().get_pixel(2, 2), WHITE);
    }

    #[test]
    fn eraser_paints_the_background_color() {
        let mut r = rig();
        r.canvas.base_mut().put_pixel(5, 5, RED);
        r.tools.select_tool(Tool::Eraser);
        r.tools.props.brush_size = 3;

        press(&mut r, 5.5, 5.5, PointerButton::Primary);
        r.tools.pointer_up(&mut r.canvas);
        assert_eq!(*r.canvas.base().get_pixel(5, 5), WHITE);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut r = rig();
        r.tools.select_tool(Tool::Brush);
        drag(&mut r, 5.0, 5.0);
        assert!(r.canvas.base().pixels().all(|&p| p == WHITE));
        assert_eq!(r.history.undo_depth(), 0);
    }

    #[test]
    fn fill_requires_the_fill_toggle() {
        let mut r = rig();
        r.tools.select_tool(Tool::Fill);
        r.tools.props.fill_color = RED;

        press(&mut r, 5.0, 5.0, PointerButton::Primary);
        assert_eq!(
            r.tools.take_status().as_deref(),
            Some("Enable 'Fill' to use this tool.")
        );
        assert!(r.canvas.base().pixels().all(|&p| p == WHITE));
        assert_eq!(r.history.undo_depth(), 0);
    }

    #[test]
    fn fill_reports_each_outcome_and_records_once() {
        let mut r = rig();
        r.tools.select_tool(Tool::Fill);
        r.tools.props.fill_enabled = true;
        r.tools.props.fill_color = RED;

        press(&mut r, 5.0, 5.0, PointerButton::Primary);
        assert_eq!(r.tools.take_status().as_deref(), Some("Area filled."));
        assert!(r.canvas.base().pixels().all(|&p| p == RED));
        assert_eq!(r.history.undo_depth(), 1);

        // same color again: status only, no history growth
        press(&mut r, 5.0, 5.0, PointerButton::Primary);
        assert_eq!(
            r.tools.take_status().as_deref(),
            Some("Already filled with this color.")
        );
        assert_eq!(r.history.undo_depth(), 1);

        // outside the surface
        press(&mut r, 500.0, 500.0, PointerButton::Primary);
        assert_eq!(r.tools.take_status().as_deref(), Some("Click inside canvas."));
        assert_eq!(r.history.undo_depth(), 1);

        assert!(r.history.undo_canvas(&mut r.canvas));
        assert!(r.canvas.base().pixels().all(|&p| p == WHITE));
    }

    #[test]
    fn copy_is_read_only_and_paste_records() {
        let mut r = rig();
        r.canvas.base_mut().put_pixel(0, 0, RED);

        press(&mut r, 3.0, 3.0, PointerButton::Secondary);
        assert!(r.tools.has_clipboard());
        assert_eq!(r.history.undo_depth(), 0);
        assert!(!r.tools.is_modified());

        press(&mut r, 4.0, 4.0, PointerButton::Tertiary);
        assert_eq!(r.history.undo_depth(), 1);
        assert_eq!(r.canvas.elements().len(), 1);
        assert!(r.tools.is_modified());
        // pasted copy carries the marked pixel at its own origin
        assert_eq!(*r.canvas.composite().get_pixel(4, 4), RED);
    }

    #[test]
    fn paste_with_empty_clipboard_does_nothing() {
        let mut r = rig();
        press(&mut r, 4.0, 4.0, PointerButton::Tertiary);
        assert_eq!(r.history.undo_depth(), 0);
        assert!(r.canvas.elements().is_empty());
    }

    #[test]
    fn color_picker_samples_without_recording() {
        let mut r = rig();
        r.canvas.base_mut().put_pixel(7, 7, RED);
        r.tools.select_tool(Tool::ColorPick);
        r.tools.props.fill_enabled = true;

        press(&mut r, 7.0, 7.0, PointerButton::Primary);
        assert_eq!(r.tools.props.stroke_color, RED);
        assert_eq!(r.tools.props.fill_color, RED);
        assert_eq!(r.history.undo_depth(), 0);
        assert!(!r.tools.is_modified());
    }

    #[test]
    fn shape_gesture_previews_then_stamps_on_release() {
        let mut r = rig();
        r.tools.select_shape(ShapeKind::Rectangle);
        r.tools.props.stroke_color = BLACK;

        press(&mut r, 2.0, 2.0, PointerButton::Primary);
        drag(&mut r, 15.0, 15.0);

        let preview = r.tools.preview().unwrap();
        assert!(preview.closed);
        assert_eq!(preview.points.len(), 4);
        // nothing rasterized yet
        assert_eq!(*r.canvas.base().get_pixel(2, 2), WHITE);

        r.tools.pointer_up(&mut r.canvas);
        assert!(r.tools.preview().is_none());
        assert_eq!(*r.canvas.base().get_pixel(2, 2), BLACK);
        assert_eq!(r.history.undo_depth(), 1);
    }

    #[test]
    fn zoom_tool_clicks_adjust_the_transform_only() {
        let mut r = rig();
        r.tools.select_tool(Tool::Zoom);

        press(&mut r, 5.0, 5.0, PointerButton::Primary);
        assert!((r.transform.zoom() - 1.2).abs() < 1e-6);

        press(&mut r, 5.0, 5.0, PointerButton::Secondary);
        assert!((r.transform.zoom() - 1.0).abs() < 1e-6);

        assert_eq!(r.history.undo_depth(), 0);
        assert!(!r.tools.is_modified());
    }

    #[test]
    fn wheel_is_consumed_by_zoom_tool_or_ctrl() {
        let mut r = rig();
        assert!(!r.tools.wheel(&mut r.transform, 1.0, false));
        assert!((r.transform.zoom() - 1.0).abs() < 1e-6);

        assert!(r.tools.wheel(&mut r.transform, 1.0, true));
        assert!((r.transform.zoom() - 1.1).abs() < 1e-6);

        r.tools.select_tool(Tool::Zoom);
        assert!(r.tools.wheel(&mut r.transform, -1.0, false));
    }

    #[test]
    fn text_click_opens_prompt_and_cancel_keeps_history_entry() {
        let mut r = rig();
        r.tools.select_tool(Tool::Text);

        press(&mut r, 6.0, 8.0, PointerButton::Primary);
        let pending = r.tools.pending_text().unwrap();
        assert!((pending.x - 6.0).abs() < 1e-6);
        assert!((pending.y - 8.0).abs() < 1e-6);
        assert_eq!(r.history.undo_depth(), 1);

        r.tools.cancel_text();
        assert!(r.tools.pending_text().is_none());
        assert_eq!(r.history.undo_depth(), 1);
        assert!(!r.tools.is_modified());
    }

    #[test]
    fn committed_text_stamps_at_the_anchor() {
        let Ok(font) = crate::ops::text::load_default_font() else {
            return;
        };
        let mut r = rig();
        r.canvas = CanvasState::new(120, 60, WHITE);
        r.tools.select_tool(Tool::Text);

        press(&mut r, 4.0, 4.0, PointerButton::Primary);
        assert!(r.tools.commit_text(&mut r.canvas, &font, "Hi", 24.0));
        assert!(r.tools.pending_text().is_none());
        assert!(r.tools.is_modified());
        assert!(r.canvas.base().pixels().any(|&p| p != WHITE));
    }

    #[test]
    fn blank_text_commit_stamps_nothing_and_reports_it() {
        let Ok(font) = crate::ops::text::load_default_font() else {
            return;
        };
        let mut r = rig();
        r.tools.select_tool(Tool::Text);

        press(&mut r, 4.0, 4.0, PointerButton::Primary);
        assert!(!r.tools.commit_text(&mut r.canvas, &font, "   \n", 24.0));
        assert!(r.tools.pending_text().is_none());
        assert!(!r.tools.is_modified());
        assert!(r.canvas.base().pixels().all(|&p| p == WHITE));
    }

    #[test]
    fn image_move_drags_the_topmost_element() {
        let mut r = rig();
        let id = r.canvas.add_element(RgbaImage::new(4, 4), 2, 2);
        r.tools.select_tool(Tool::ImageMove);

        press(&mut r, 3.0, 3.0, PointerButton::Primary);
        drag(&mut r, 9.0, 7.0);
        r.tools.pointer_up(&mut r.canvas);

        let el = r.canvas.elements().iter().find(|e| e.id == id).unwrap();
        assert_eq!((el.x, el.y), (8, 6));
        assert_eq!(r.history.undo_depth(), 1);
    }

    #[test]
    fn image_move_on_empty_space_is_a_no_op() {
        let mut r = rig();
        r.tools.select_tool(Tool::ImageMove);
        press(&mut r, 5.0, 5.0, PointerButton::Primary);
        drag(&mut r, 9.0, 9.0);
        assert_eq!(r.history.undo_depth(), 0);
        assert!(!r.tools.is_modified());
    }
}
