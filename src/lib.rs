//! Paint Studio — a raster paint application core.
//!
//! The library owns everything below the window shell: the live pixel
//! buffer and its floating image elements (`canvas`), snapshot-based
//! undo/redo (`components::history`), the tool dispatch state machine
//! (`components::tools`), zoom/coordinate mapping (`transform`), the CPU
//! drawing primitives and flood fill (`ops`), image import/export (`io`),
//! and persisted settings plus toolbar icons (`assets`).
//!
//! The eframe shell in the binary (`app.rs`) feeds raw pointer events into
//! [`components::tools::ToolManager`] and renders whatever the core says.

#![warn(clippy::all)]

pub mod assets;
pub mod canvas;
pub mod components;
pub mod error;
pub mod io;
pub mod ops;
pub mod transform;

pub use canvas::{CanvasState, ImageElement, Snapshot};
pub use components::history::History;
pub use components::tools::{PointerButton, PointerEvent, Tool, ToolManager};
pub use error::{Error, Result};
pub use ops::draw::{BrushStyle, ShapeKind};
pub use transform::CanvasTransform;
