//! Raster export of the current row.
//!
//! The compositor draws every visible glyph into its slot box through the
//! glyph's viewport (stretched, aspect ratio not preserved), on a padded
//! background at a supersampling factor, and encodes the result as PNG.

mod compositor;

pub use compositor::Compositor;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use log::info;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid export configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// An encoded export.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// PNG bytes.
    pub data: Vec<u8>,
}

impl ExportedImage {
    /// Encode straight RGBA pixels as PNG.
    pub(crate) fn encode(
        filename: String,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Self, ExportError> {
        let image =
            RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::Surface { width, height })?;
        let mut data = Vec::new();
        image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
        Ok(Self {
            filename,
            width,
            height,
            data,
        })
    }

    /// Write into `dir` under [`filename`](Self::filename).
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.data)?;
        info!("Wrote {} ({}x{})", path.display(), self.width, self.height);
        Ok(path)
    }
}

/// File name for an export of `text` taken at `unix_millis`.
///
/// # Example
/// ```
/// use glyph_distort::export::export_filename;
///
/// assert_eq!(export_filename("Hello, World!", 42), "distortion-Hello-World-42.png");
/// assert_eq!(export_filename("!!!", 7), "distortion-text-7.png");
/// ```
pub fn export_filename(text: &str, unix_millis: u128) -> String {
    format!("distortion-{}-{}.png", sanitize(text), unix_millis)
}

fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "text".to_string()
    } else {
        trimmed.to_string()
    }
}
