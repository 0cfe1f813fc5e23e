//! The eframe window shell.
//!
//! The shell owns the widgets and the canvas texture; every edit goes
//! through the library core. Pointer input over the canvas is translated to
//! [`PointerEvent`]s for the tool manager, and the texture is re-uploaded
//! only when the canvas revision changes.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{
    self, Color32, ColorImage, Pos2, Rect, Stroke, TextureHandle, TextureOptions, Vec2,
};
use log::warn;

use paint_studio::assets::{format_hex_color, AppSettings, Icon, IconSet, Theme};
use paint_studio::canvas::{CanvasState, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use paint_studio::components::history::History;
use paint_studio::components::tools::{PointerButton, PointerEvent, Tool, ToolManager};
use paint_studio::io;
use paint_studio::ops::canvas_ops::{self, FlipDirection, Rotation};
use paint_studio::ops::draw::{BrushStyle, ShapeKind};
use paint_studio::ops::text::{self, DEFAULT_FONT_SIZE};
use paint_studio::transform::{CanvasTransform, ZOOM_PRESETS};

/// Quick-pick palette shown under the color editors.
const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0xff, 0xff, 0xff],
    [0xff, 0x00, 0x00],
    [0x00, 0xff, 0x00],
    [0x00, 0x00, 0xff],
    [0xff, 0xff, 0x00],
    [0xff, 0x00, 0xff],
    [0x00, 0xff, 0xff],
    [0x80, 0x00, 0x00],
    [0x00, 0x80, 0x00],
    [0x00, 0x00, 0x80],
    [0x80, 0x80, 0x00],
    [0x80, 0x00, 0x80],
    [0x00, 0x80, 0x80],
    [0x80, 0x80, 0x80],
    [0xc0, 0xc0, 0xc0],
];

/// Grid line spacing in logical pixels.
const GRID_SPACING: u32 = 20;
/// Ruler tick spacing in logical pixels.
const RULER_SPACING: u32 = 50;

const GRID_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x77);
const RULER_COLOR: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xff);

pub struct PaintStudioApp {
    settings: AppSettings,
    settings_dirty: bool,

    canvas: CanvasState,
    history: History,
    tools: ToolManager,
    transform: CanvasTransform,

    icons: IconSet,
    font: Option<ab_glyph::FontArc>,

    // canvas texture cache
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    uploaded_nearest: bool,

    // per-frame shell state
    canvas_avail: Vec2,
    pointer_logical: Option<(f32, f32)>,
    dragging: bool,
    status: String,
    file_name: Option<String>,

    // dialogs
    show_resize: bool,
    resize_w: String,
    resize_h: String,
    resize_error: Option<String>,
    show_clear_confirm: bool,
    text_input: String,
    text_size: f32,
    pending_exit: bool,
    force_exit: bool,
}

impl PaintStudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, open: Option<PathBuf>) -> Self {
        let settings = AppSettings::load();
        match settings.theme {
            Theme::Dark => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
            Theme::Light => cc.egui_ctx.set_visuals(egui::Visuals::light()),
        }

        let mut canvas =
            CanvasState::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, settings.background_color());
        let mut file_name = None;
        if let Some(path) = &open {
            match io::load_as_surface(path) {
                Ok(surface) => {
                    canvas.set_surface(surface);
                    file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned());
                }
                Err(err) => warn!("could not open {}: {err}", path.display()),
            }
        }

        let mut tools = ToolManager::new();
        tools.props.brush_size = settings.default_brush_size.clamp(1, 50);

        let font = match text::load_default_font() {
            Ok(font) => Some(font),
            Err(err) => {
                warn!("text tool disabled: {err}");
                None
            }
        };

        let icons = IconSet::load(&cc.egui_ctx, &icons_dir());
        if icons.is_empty() {
            warn!("no toolbar icons found, buttons use text labels");
        }

        Self {
            history: History::new(settings.max_undo_steps),
            canvas,
            tools,
            transform: CanvasTransform::new(),
            icons,
            font,
            texture: None,
            uploaded_revision: None,
            uploaded_nearest: false,
            canvas_avail: Vec2::new(DEFAULT_WIDTH as f32, DEFAULT_HEIGHT as f32),
            pointer_logical: None,
            dragging: false,
            status: "Ready.".to_string(),
            file_name,
            show_resize: false,
            resize_w: String::new(),
            resize_h: String::new(),
            resize_error: None,
            show_clear_confirm: false,
            text_input: String::new(),
            text_size: DEFAULT_FONT_SIZE,
            pending_exit: false,
            force_exit: false,
            settings,
            settings_dirty: false,
        }
    }

    fn modal_open(&self) -> bool {
        self.show_resize
            || self.show_clear_confirm
            || self.pending_exit
            || self.tools.pending_text().is_some()
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn undo(&mut self) {
        if self.history.undo_canvas(&mut self.canvas) {
            self.tools.mark_modified();
            self.status = "Undone.".to_string();
        } else {
            self.status = "Nothing to undo.".to_string();
        }
    }

    fn redo(&mut self) {
        if self.history.redo_canvas(&mut self.canvas) {
            self.tools.mark_modified();
            self.status = "Redone.".to_string();
        } else {
            self.status = "Nothing to redo.".to_string();
        }
    }

    fn open_file(&mut self) {
        let Some(path) = io::pick_open_path() else {
            return;
        };
        match io::load_as_surface(&path) {
            Ok(surface) => {
                self.canvas.set_surface(surface);
                self.history.clear();
                self.tools.mark_saved();
                self.file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.status = format!("Opened {}.", path.display());
            }
            Err(err) => self.status = format!("Could not open file: {err}"),
        }
    }

    fn import_image(&mut self) {
        let Some(path) = io::pick_open_path() else {
            return;
        };
        // import only mutates on success, so the pre-state is recorded then
        let before = self.canvas.snapshot();
        match io::import_into(&mut self.canvas, &path) {
            Ok(_) => {
                self.history.record(before);
                self.tools.mark_modified();
                self.tools.select_tool(Tool::ImageMove);
                self.status = "Image imported; drag it into place.".to_string();
            }
            Err(err) => self.status = format!("Could not import image: {err}"),
        }
    }

    /// Returns true when the canvas actually hit the disk.
    fn export(&mut self) -> bool {
        let Some(path) = io::pick_export_path() else {
            return false;
        };
        match io::export(&self.canvas, &path) {
            Ok(()) => {
                self.tools.mark_saved();
                self.file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.status = format!("Saved to {}.", path.display());
                true
            }
            Err(err) => {
                self.status = format!("Could not save: {err}");
                false
            }
        }
    }

    fn rotate(&mut self, rotation: Rotation) {
        self.history.record_canvas(&self.canvas);
        canvas_ops::rotate_canvas(&mut self.canvas, rotation);
        self.tools.mark_modified();
        self.status = format!("{} applied.", rotation.label());
    }

    fn flip(&mut self, direction: FlipDirection) {
        self.history.record_canvas(&self.canvas);
        canvas_ops::flip_canvas(&mut self.canvas, direction);
        self.tools.mark_modified();
        self.status = format!("{} applied.", direction.label());
    }

    fn fit_to_window(&mut self) {
        let w = self.canvas_avail.x.max(1.0) as u32;
        let h = self.canvas_avail.y.max(1.0) as u32;
        self.history.record_canvas(&self.canvas);
        if canvas_ops::fit_canvas(&mut self.canvas, w, h).is_ok() {
            self.tools.mark_modified();
            self.status = format!("Canvas fit to {}x{}.", self.canvas.width(), self.canvas.height());
        }
    }

    // ========================================================================
    // TOOLBAR
    // ========================================================================

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open…").clicked() {
                    ui.close_menu();
                    self.open_file();
                }
                if ui.button("Import Image…").clicked() {
                    ui.close_menu();
                    self.import_image();
                }
                if ui.button("Export…").clicked() {
                    ui.close_menu();
                    self.export();
                }
                ui.separator();
                if ui.button("Clear Canvas").clicked() {
                    ui.close_menu();
                    self.show_clear_confirm = true;
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ui.close_menu();
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(self.history.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    ui.close_menu();
                    self.undo();
                }
                if ui
                    .add_enabled(self.history.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    ui.close_menu();
                    self.redo();
                }
            });

            ui.menu_button("Image", |ui| {
                for rotation in [Rotation::Cw90, Rotation::Cw180, Rotation::Cw270] {
                    if ui.button(rotation.label()).clicked() {
                        ui.close_menu();
                        self.rotate(rotation);
                    }
                }
                ui.separator();
                for direction in [FlipDirection::Horizontal, FlipDirection::Vertical] {
                    if ui.button(direction.label()).clicked() {
                        ui.close_menu();
                        self.flip(direction);
                    }
                }
                ui.separator();
                if ui.button("Resize…").clicked() {
                    ui.close_menu();
                    self.resize_w = self.canvas.width().to_string();
                    self.resize_h = self.canvas.height().to_string();
                    self.resize_error = None;
                    self.show_resize = true;
                }
                if ui.button("Fit to Window").clicked() {
                    ui.close_menu();
                    self.fit_to_window();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.checkbox(&mut self.settings.show_grid, "Grid").changed() {
                    self.settings_dirty = true;
                }
                if ui
                    .checkbox(&mut self.settings.show_ruler, "Rulers")
                    .changed()
                {
                    self.settings_dirty = true;
                }
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Canvas background:");
                    let mut bg = self.canvas.background().0;
                    if ui.color_edit_button_srgb(&mut bg).changed() {
                        self.canvas.set_background(image::Rgb(bg));
                        self.tools.mark_modified();
                        self.settings.canvas_bg = format_hex_color(image::Rgb(bg));
                        self.settings_dirty = true;
                    }
                });
                ui.separator();
                for theme in [Theme::Dark, Theme::Light] {
                    if ui
                        .selectable_label(self.settings.theme == theme, theme.label())
                        .clicked()
                    {
                        self.settings.theme = theme;
                        self.settings_dirty = true;
                        ui.ctx().set_visuals(match theme {
                            Theme::Dark => egui::Visuals::dark(),
                            Theme::Light => egui::Visuals::light(),
                        });
                    }
                }
            });
        });
    }

    fn tool_strip(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if self.icons.action_button(ui, Icon::Open, "Open", true).clicked() {
                self.open_file();
            }
            if self.icons.action_button(ui, Icon::Save, "Save", true).clicked() {
                self.export();
            }
            if self
                .icons
                .action_button(ui, Icon::Undo, "Undo", self.history.can_undo())
                .clicked()
            {
                self.undo();
            }
            if self
                .icons
                .action_button(ui, Icon::Redo, "Redo", self.history.can_redo())
                .clicked()
            {
                self.redo();
            }
            if self.icons.action_button(ui, Icon::Clear, "Clear", true).clicked() {
                self.show_clear_confirm = true;
            }

            ui.separator();

            for (tool, icon) in [
                (Tool::Brush, Icon::Brush),
                (Tool::Pencil, Icon::Pencil),
                (Tool::Eraser, Icon::Eraser),
                (Tool::Fill, Icon::Fill),
                (Tool::Text, Icon::Text),
                (Tool::ColorPick, Icon::ColorPicker),
                (Tool::Zoom, Icon::Zoom),
                (Tool::Shape, Icon::Shapes),
                (Tool::ImageMove, Icon::MoveImage),
            ] {
                let selected = self.tools.tool() == tool;
                if self
                    .icons
                    .tool_button(ui, icon, tool.label(), selected)
                    .clicked()
                {
                    self.tools.select_tool(tool);
                    self.status = format!("{} selected.", tool.label());
                }
            }

            ui.separator();

            for &kind in ShapeKind::all() {
                let selected = self.tools.shape() == Some(kind);
                if ui.selectable_label(selected, kind.label()).clicked() {
                    self.tools.select_shape(kind);
                    self.status = format!("{} shape selected.", kind.label());
                }
            }

            ui.separator();

            let slider = egui::Slider::new(&mut self.tools.props.brush_size, 1..=50).text("Size");
            if ui.add(slider).changed() {
                self.settings.default_brush_size = self.tools.props.brush_size;
                self.settings_dirty = true;
            }

            egui::ComboBox::from_id_source("brush_style")
                .selected_text(self.tools.props.brush_style.label())
                .show_ui(ui, |ui| {
                    for &style in BrushStyle::all() {
                        ui.selectable_value(
                            &mut self.tools.props.brush_style,
                            style,
                            style.label(),
                        );
                    }
                });

            ui.checkbox(&mut self.tools.props.fill_enabled, "Fill");

            let mut stroke = self.tools.props.stroke_color.0;
            if ui.color_edit_button_srgb(&mut stroke).changed() {
                self.tools.props.stroke_color = image::Rgb(stroke);
            }
            let mut fill = self.tools.props.fill_color.0;
            if ui.color_edit_button_srgb(&mut fill).changed() {
                self.tools.props.fill_color = image::Rgb(fill);
            }

            for rgb in PALETTE {
                let color = Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
                let swatch = egui::Button::new("").fill(color).min_size(Vec2::splat(16.0));
                let response = ui.add(swatch);
                if response.clicked() {
                    self.tools.props.stroke_color = image::Rgb(rgb);
                }
                if response.secondary_clicked() {
                    self.tools.props.fill_color = image::Rgb(rgb);
                }
            }

            ui.separator();

            egui::ComboBox::from_id_source("zoom_level")
                .selected_text(format!("{:.0}%", self.transform.zoom_percent()))
                .show_ui(ui, |ui| {
                    for &preset in ZOOM_PRESETS {
                        if ui.selectable_label(false, format!("{preset}%")).clicked() {
                            self.transform.set_level_percent(preset as f32);
                        }
                    }
                });
        });
    }

    // ========================================================================
    // CANVAS PANEL
    // ========================================================================

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let nearest = self.transform.zoom() >= 2.0;
        let current = self.uploaded_revision == Some(self.canvas.revision())
            && self.uploaded_nearest == nearest
            && self.texture.is_some();
        if current {
            return;
        }

        let flat = self.canvas.composite();
        let size = [flat.width() as usize, flat.height() as usize];
        let pixels: Vec<Color32> = flat
            .pixels()
            .map(|p| Color32::from_rgb(p[0], p[1], p[2]))
            .collect();
        let image = egui::ImageData::Color(Arc::new(ColorImage { size, pixels }));
        let options = if nearest {
            TextureOptions::NEAREST
        } else {
            TextureOptions::LINEAR
        };

        match &mut self.texture {
            Some(tex) => tex.set(image, options),
            None => self.texture = Some(ctx.load_texture("canvas", image, options)),
        }
        self.uploaded_revision = Some(self.canvas.revision());
        self.uploaded_nearest = nearest;
    }

    fn canvas_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        self.canvas_avail = ui.available_size();
        self.upload_texture(ctx);
        let modal_open = self.modal_open();

        egui::ScrollArea::both().show(ui, |ui| {
            let zoom = self.transform.zoom();
            let size = Vec2::new(
                (self.canvas.width() as f32 * zoom).max(1.0),
                (self.canvas.height() as f32 * zoom).max(1.0),
            );
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let rect = response.rect;

            if let Some(texture) = &self.texture {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture.id(), rect, uv, Color32::WHITE);
            }

            self.draw_overlays(&painter, rect);

            // live coordinate readout for the status bar
            self.pointer_logical = ctx
                .input(|i| i.pointer.hover_pos())
                .filter(|pos| rect.contains(*pos))
                .and_then(|pos| {
                    self.transform
                        .screen_to_logical(pos.x - rect.min.x, pos.y - rect.min.y)
                });

            if !modal_open {
                self.handle_pointer(ctx, rect);
                self.handle_wheel(ctx, rect);
            }
        });
    }

    fn draw_overlays(&self, painter: &egui::Painter, rect: Rect) {
        let zoom = self.transform.zoom();

        if self.settings.show_grid && zoom > 0.0 {
            let stroke = Stroke::new(1.0, GRID_COLOR);
            let mut x = 0;
            while x < self.canvas.width() {
                let sx = rect.min.x + x as f32 * zoom;
                painter.extend(egui::Shape::dashed_line(
                    &[Pos2::new(sx, rect.min.y), Pos2::new(sx, rect.max.y)],
                    stroke,
                    2.0,
                    2.0,
                ));
                x += GRID_SPACING;
            }
            let mut y = 0;
            while y < self.canvas.height() {
                let sy = rect.min.y + y as f32 * zoom;
                painter.extend(egui::Shape::dashed_line(
                    &[Pos2::new(rect.min.x, sy), Pos2::new(rect.max.x, sy)],
                    stroke,
                    2.0,
                    2.0,
                ));
                y += GRID_SPACING;
            }
        }

        if self.settings.show_ruler && zoom > 0.0 {
            let stroke = Stroke::new(1.0, RULER_COLOR);
            let font = egui::FontId::proportional(9.0);
            let mut x = 0;
            while x <= self.canvas.width() {
                let sx = rect.min.x + x as f32 * zoom;
                painter.line_segment(
                    [Pos2::new(sx, rect.min.y), Pos2::new(sx, rect.min.y + 8.0)],
                    stroke,
                );
                painter.text(
                    Pos2::new(sx + 2.0, rect.min.y + 2.0),
                    egui::Align2::LEFT_TOP,
                    x.to_string(),
                    font.clone(),
                    RULER_COLOR,
                );
                x += RULER_SPACING;
            }
            let mut y = 0;
            while y <= self.canvas.height() {
                let sy = rect.min.y + y as f32 * zoom;
                painter.line_segment(
                    [Pos2::new(rect.min.x, sy), Pos2::new(rect.min.x + 8.0, sy)],
                    stroke,
                );
                painter.text(
                    Pos2::new(rect.min.x + 2.0, sy + 2.0),
                    egui::Align2::LEFT_TOP,
                    y.to_string(),
                    font.clone(),
                    RULER_COLOR,
                );
                y += RULER_SPACING;
            }
        }

        // floating element outlines while the move tool is active
        if self.tools.tool() == Tool::ImageMove {
            for el in self.canvas.elements() {
                let (sx, sy) = self.transform.logical_to_screen(el.x as f32, el.y as f32);
                let (sw, sh) = self
                    .transform
                    .logical_to_screen(el.image.width() as f32, el.image.height() as f32);
                let outline = Rect::from_min_size(
                    Pos2::new(rect.min.x + sx, rect.min.y + sy),
                    Vec2::new(sw, sh),
                );
                painter.rect_stroke(outline, 0.0, Stroke::new(1.0, RULER_COLOR));
            }
        }

        // dashed shape preview with a translucent interior when fill is on
        if let Some(preview) = self.tools.preview() {
            let mut points: Vec<Pos2> = preview
                .points
                .iter()
                .map(|&(x, y)| {
                    let (sx, sy) = self.transform.logical_to_screen(x, y);
                    Pos2::new(rect.min.x + sx, rect.min.y + sy)
                })
                .collect();
            if let Some(fill) = preview.fill {
                painter.add(egui::Shape::convex_polygon(
                    points.clone(),
                    Color32::from_rgba_unmultiplied(fill[0], fill[1], fill[2], 80),
                    Stroke::NONE,
                ));
            }
            if preview.closed {
                if let Some(&first) = points.first() {
                    points.push(first);
                }
            }
            painter.extend(egui::Shape::dashed_line(
                &points,
                Stroke::new(1.5, RULER_COLOR),
                6.0,
                4.0,
            ));
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, rect: Rect) {
        let (hover, pressed, down, released, secondary, middle) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.button_pressed(egui::PointerButton::Secondary),
                i.pointer.button_pressed(egui::PointerButton::Middle),
            )
        });

        if released {
            self.tools.pointer_up(&mut self.canvas);
            self.dragging = false;
        }

        let Some(pos) = hover else {
            return;
        };
        let over = rect.contains(pos) && !ctx.is_pointer_over_area();
        let event = |button| PointerEvent {
            x: pos.x - rect.min.x,
            y: pos.y - rect.min.y,
            button,
        };

        if over && pressed {
            self.tools.pointer_down(
                &mut self.canvas,
                &mut self.history,
                &mut self.transform,
                event(PointerButton::Primary),
            );
            self.dragging = true;
        } else if self.dragging && down {
            self.tools
                .pointer_drag(&mut self.canvas, &self.transform, event(PointerButton::Primary));
        }

        if over && secondary {
            self.tools.pointer_down(
                &mut self.canvas,
                &mut self.history,
                &mut self.transform,
                event(PointerButton::Secondary),
            );
        }
        if over && middle {
            self.tools.pointer_down(
                &mut self.canvas,
                &mut self.history,
                &mut self.transform,
                event(PointerButton::Tertiary),
            );
        }
    }

    fn handle_wheel(&mut self, ctx: &egui::Context, rect: Rect) {
        let pointer_over_widget = ctx.is_pointer_over_area();
        ctx.input_mut(|i| {
            if i.scroll_delta.y.abs() > 0.1 {
                let over_canvas = i
                    .pointer
                    .hover_pos()
                    .is_some_and(|pos| rect.contains(pos));
                if over_canvas && !pointer_over_widget {
                    let delta = i.scroll_delta.y;
                    if self.tools.wheel(&mut self.transform, delta, i.modifiers.ctrl) {
                        i.scroll_delta.y = 0.0;
                    }
                }
            }
        });
    }

    // ========================================================================
    // DIALOGS
    // ========================================================================

    fn text_prompt(&mut self, ctx: &egui::Context) {
        if self.tools.pending_text().is_none() {
            return;
        }
        let mut do_commit = false;
        let mut do_cancel = false;
        egui::Window::new("Insert Text")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.text_input)
                        .hint_text("Text to place")
                        .desired_rows(3),
                );
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    ui.add(egui::DragValue::new(&mut self.text_size).clamp_range(6.0..=144.0));
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        do_commit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        do_cancel = true;
                    }
                });
            });

        if do_commit {
            match &self.font {
                Some(font) => {
                    let font = font.clone();
                    let stamped = self
                        .tools
                        .commit_text(&mut self.canvas, &font, &self.text_input, self.text_size);
                    self.status = if stamped {
                        "Text placed.".to_string()
                    } else {
                        "Text input was empty.".to_string()
                    };
                }
                None => {
                    self.tools.cancel_text();
                    self.status = "No usable font found; text tool unavailable.".to_string();
                }
            }
            self.text_input.clear();
        }
        if do_cancel {
            self.tools.cancel_text();
            self.text_input.clear();
        }
    }

    fn resize_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_resize {
            return;
        }
        let mut do_apply = false;
        let mut do_cancel = false;
        egui::Window::new("Resize Canvas")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Width:");
                    ui.text_edit_singleline(&mut self.resize_w);
                });
                ui.horizontal(|ui| {
                    ui.label("Height:");
                    ui.text_edit_singleline(&mut self.resize_h);
                });
                if let Some(err) = &self.resize_error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        do_apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        do_cancel = true;
                    }
                });
            });

        if do_apply {
            match canvas_ops::parse_dimensions(&self.resize_w, &self.resize_h) {
                Ok((w, h)) => {
                    self.history.record_canvas(&self.canvas);
                    if canvas_ops::resize_canvas(&mut self.canvas, w, h).is_ok() {
                        self.tools.mark_modified();
                        self.status = format!("Canvas resized to {w}x{h}.");
                    }
                    self.show_resize = false;
                    self.resize_error = None;
                }
                Err(err) => self.resize_error = Some(err.to_string()),
            }
        }
        if do_cancel {
            self.show_resize = false;
            self.resize_error = None;
        }
    }

    fn clear_confirm(&mut self, ctx: &egui::Context) {
        if !self.show_clear_confirm {
            return;
        }
        let mut do_clear = false;
        let mut do_cancel = false;
        egui::Window::new("Clear Canvas")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Clear the entire canvas?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        do_clear = true;
                    }
                    if ui.button("Cancel").clicked() {
                        do_cancel = true;
                    }
                });
            });

        if do_clear {
            self.history.record_canvas(&self.canvas);
            self.canvas.clear();
            self.tools.mark_modified();
            self.status = "Canvas cleared.".to_string();
            self.show_clear_confirm = false;
        }
        if do_cancel {
            self.show_clear_confirm = false;
        }
    }

    fn exit_confirm(&mut self, ctx: &egui::Context) {
        if !self.pending_exit {
            return;
        }
        let mut do_save = false;
        let mut do_discard = false;
        let mut do_cancel = false;
        egui::Window::new("Unsaved Changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The canvas has unsaved changes.");
                ui.label("Do you want to save before closing?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        do_save = true;
                    }
                    if ui.button("Don't Save").clicked() {
                        do_discard = true;
                    }
                    if ui.button("Cancel").clicked() {
                        do_cancel = true;
                    }
                });
            });

        if do_save {
            self.pending_exit = false;
            if self.export() {
                self.force_exit = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
        if do_discard {
            self.pending_exit = false;
            self.force_exit = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if do_cancel {
            self.pending_exit = false;
        }
    }
}

impl eframe::App for PaintStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // window title reflects the open file and dirty state
        {
            let name = self.file_name.as_deref().unwrap_or("untitled");
            let dirty = if self.tools.is_modified() { "*" } else { "" };
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "Paint Studio - {name}{dirty}"
            )));
        }

        // intercept the OS close button while edits are unsaved
        if ctx.input(|i| i.viewport().close_requested())
            && !self.force_exit
            && self.tools.is_modified()
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.pending_exit = true;
        }

        if let Some(msg) = self.tools.take_status() {
            self.status = msg;
        }

        if !self.modal_open() {
            let (undo, redo) = ctx.input(|i| {
                (
                    i.modifiers.ctrl && i.key_pressed(egui::Key::Z),
                    i.modifiers.ctrl && i.key_pressed(egui::Key::Y),
                )
            });
            if undo {
                self.undo();
            }
            if redo {
                self.redo();
            }
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui);
        });
        egui::TopBottomPanel::top("tool_strip").show(ctx, |ui| {
            self.tool_strip(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", self.transform.zoom_percent()));
                    ui.separator();
                    if let Some((x, y)) = self.pointer_logical {
                        ui.label(format!("X: {:.0}  Y: {:.0}", x, y));
                        ui.separator();
                    }
                    ui.label(format!("{}x{}", self.canvas.width(), self.canvas.height()));
                    ui.separator();
                    ui.label(self.tools.tool().label());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_panel(ctx, ui);
        });

        self.text_prompt(ctx);
        self.resize_dialog(ctx);
        self.clear_confirm(ctx);
        self.exit_confirm(ctx);

        if self.settings_dirty {
            self.settings.save();
            self.settings_dirty = false;
        }
    }
}

/// Icons live in an `icons/` directory beside the executable; a plain
/// `icons/` in the working directory works for development runs.
fn icons_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("icons")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("icons"))
}
