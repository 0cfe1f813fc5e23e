//! Crate-wide error type.
//!
//! Everything here is recoverable: callers surface these as status messages
//! or dialog text and carry on. Nothing in the library panics on bad input.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported output format: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("enter valid numbers, got \"{0}\"")]
    BadNumericInput(String),

    #[error("no font available for the text tool")]
    NoFont,

    #[error("file has no extension: {0}")]
    MissingExtension(PathBuf),
}
