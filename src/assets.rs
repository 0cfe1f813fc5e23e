//! Persistent settings and toolbar icon loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use egui::{TextureHandle, TextureOptions};
use image::Rgb;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::canvas::DEFAULT_BACKGROUND;
use crate::components::history::DEFAULT_MAX_DEPTH;

// ============================================================================
// COLOR HELPERS
// ============================================================================

/// Parses `#rrggbb` (leading `#` optional, case-insensitive).
pub fn parse_hex_color(s: &str) -> Option<Rgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb([r, g, b]))
}

pub fn format_hex_color(c: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

// ============================================================================
// APP SETTINGS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

/// Settings that persist across sessions as `paint_settings.json`.
///
/// Unknown keys in the file are ignored and missing keys take defaults, so
/// the file survives version skew in both directions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: Theme,
    pub default_brush_size: u32,
    /// Canvas background as `#rrggbb`.
    pub canvas_bg: String,
    pub show_grid: bool,
    pub show_ruler: bool,
    pub max_undo_steps: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            default_brush_size: 4,
            canvas_bg: format_hex_color(DEFAULT_BACKGROUND),
            show_grid: false,
            show_ruler: false,
            max_undo_steps: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AppSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/paint-studio/paint_settings.json  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\PaintStudio\paint_settings.json
    /// On macOS:   ~/Library/Application Support/paint-studio/paint_settings.json
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("paint-studio");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("paint_settings.json"));
        }

        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            let config_dir = PathBuf::from(appdata).join("PaintStudio");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("paint_settings.json"));
        }

        #[cfg(not(any(target_os = "linux", target_os = "windows")))]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            let config_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("paint-studio");
            let _ = std::fs::create_dir_all(&config_dir);
            Some(config_dir.join("paint_settings.json"))
        }
    }

    fn from_json(content: &str) -> Self {
        match serde_json::from_str(content) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("settings file unreadable, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// corrupt. Never fails.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content),
            Err(_) => Self::default(),
        }
    }

    /// Writes settings to disk. A failure is logged, not surfaced: losing a
    /// preference is not worth interrupting an edit.
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    warn!("could not save settings to {}: {err}", path.display());
                }
            }
            Err(err) => warn!("could not serialize settings: {err}"),
        }
    }

    /// Canvas background color, defaulting when the stored hex is invalid.
    pub fn background_color(&self) -> Rgb<u8> {
        parse_hex_color(&self.canvas_bg).unwrap_or(DEFAULT_BACKGROUND)
    }
}

// ============================================================================
// TOOLBAR ICONS
// ============================================================================

/// Icon identifiers for the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Brush,
    Pencil,
    Eraser,
    Fill,
    Text,
    ColorPicker,
    Zoom,
    Shapes,
    MoveImage,
    Undo,
    Redo,
    Open,
    Save,
    Clear,
}

impl Icon {
    fn file_name(&self) -> &'static str {
        match self {
            Icon::Brush => "brush.png",
            Icon::Pencil => "pencil.png",
            Icon::Eraser => "eraser.png",
            Icon::Fill => "fill.png",
            Icon::Text => "text.png",
            Icon::ColorPicker => "color_picker.png",
            Icon::Zoom => "zoom.png",
            Icon::Shapes => "shapes.png",
            Icon::MoveImage => "move_image.png",
            Icon::Undo => "undo.png",
            Icon::Redo => "redo.png",
            Icon::Open => "open.png",
            Icon::Save => "save.png",
            Icon::Clear => "clear.png",
        }
    }

    fn all() -> &'static [Icon] {
        &[
            Icon::Brush,
            Icon::Pencil,
            Icon::Eraser,
            Icon::Fill,
            Icon::Text,
            Icon::ColorPicker,
            Icon::Zoom,
            Icon::Shapes,
            Icon::MoveImage,
            Icon::Undo,
            Icon::Redo,
            Icon::Open,
            Icon::Save,
            Icon::Clear,
        ]
    }
}

/// Toolbar icon textures loaded from an `icons/` directory next to the
/// executable. Icons are cosmetic: every missing or undecodable file is
/// skipped and the toolbar falls back to text labels.
#[derive(Default)]
pub struct IconSet {
    textures: HashMap<Icon, TextureHandle>,
}

impl IconSet {
    pub fn load(ctx: &egui::Context, dir: &Path) -> Self {
        let mut textures = HashMap::new();
        for &icon in Icon::all() {
            let path = dir.join(icon.file_name());
            let Ok(decoded) = image::open(&path) else {
                warn!("no icon at {}, button falls back to text", path.display());
                continue;
            };
            let rgba = decoded.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            let handle = ctx.load_texture(
                icon.file_name(),
                egui::ImageData::Color(std::sync::Arc::new(color_image)),
                TextureOptions::LINEAR,
            );
            textures.insert(icon, handle);
        }
        Self { textures }
    }

    /// Selectable toolbar button: icon texture when available, the text
    /// label otherwise.
    pub fn tool_button(
        &self,
        ui: &mut egui::Ui,
        icon: Icon,
        label: &str,
        selected: bool,
    ) -> egui::Response {
        if let Some(texture) = self.textures.get(&icon) {
            let sized = egui::load::SizedTexture::from_handle(texture);
            let img = egui::Image::from_texture(sized).fit_to_exact_size(egui::Vec2::splat(20.0));
            let mut button = egui::Button::image(img);
            if selected {
                button = button.fill(ui.visuals().selection.bg_fill);
            }
            ui.add(button).on_hover_text(label)
        } else {
            ui.selectable_label(selected, label)
        }
    }

    /// One-shot action button (open, save, undo, ...) with the same
    /// icon-or-text fallback as [`IconSet::tool_button`].
    pub fn action_button(
        &self,
        ui: &mut egui::Ui,
        icon: Icon,
        label: &str,
        enabled: bool,
    ) -> egui::Response {
        if let Some(texture) = self.textures.get(&icon) {
            let sized = egui::load::SizedTexture::from_handle(texture);
            let img = egui::Image::from_texture(sized).fit_to_exact_size(egui::Vec2::splat(20.0));
            ui.add_enabled(enabled, egui::Button::image(img))
                .on_hover_text(label)
        } else {
            ui.add_enabled(enabled, egui::Button::new(label))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_roundtrips() {
        let c = Rgb([0x25, 0x25, 0x3a]);
        assert_eq!(parse_hex_color(&format_hex_color(c)), Some(c));
        assert_eq!(parse_hex_color("FF0080"), Some(Rgb([255, 0, 128])));
        assert_eq!(parse_hex_color("  #abcdef "), Some(Rgb([0xab, 0xcd, 0xef])));
    }

    #[test]
    fn hex_parsing_rejects_malformed_input() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#11223344"), None);
    }

    #[test]
    fn settings_json_roundtrip() {
        let mut settings = AppSettings::default();
        settings.default_brush_size = 12;
        settings.show_grid = true;
        settings.theme = Theme::Light;

        let json = serde_json::to_string(&settings).unwrap();
        let back = AppSettings::from_json(&json);
        assert_eq!(back.default_brush_size, 12);
        assert!(back.show_grid);
        assert_eq!(back.theme, Theme::Light);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let back = AppSettings::from_json("{not json");
        assert_eq!(back.default_brush_size, AppSettings::default().default_brush_size);
        assert_eq!(back.canvas_bg, format_hex_color(DEFAULT_BACKGROUND));
    }

    #[test]
    fn partial_settings_take_defaults_for_missing_keys() {
        let back = AppSettings::from_json(r#"{ "default_brush_size": 9 }"#);
        assert_eq!(back.default_brush_size, 9);
        assert_eq!(back.max_undo_steps, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn icon_set_skips_missing_files() {
        let dir = std::env::temp_dir().join(format!(
            "paint-studio-test-icons-{}",
            std::process::id()
        ));
        let _ = std::fs::create_dir_all(&dir);
        let ctx = egui::Context::default();
        let icons = IconSet::load(&ctx, &dir);
        assert!(icons.is_empty());
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn invalid_stored_background_defaults() {
        let mut settings = AppSettings::default();
        settings.canvas_bg = "#zzzzzz".to_string();
        assert_eq!(settings.background_color(), DEFAULT_BACKGROUND);
    }
}
