//! Canvas operations: drawing primitives, flood fill, text stamping, and
//! whole-canvas transforms.

pub mod canvas_ops;
pub mod draw;
pub mod fill;
pub mod text;
