//! Glyph metrics and outlines.
//!
//! The layout engine only sees the [`GlyphMetricsProvider`] trait: given a
//! character and a pixel size it returns the glyph's bounding box and outline in
//! pixel space. [`FontFace`] implements it for TrueType/OpenType files.

mod face;
mod outline;

pub use face::{load_font, FontFace};
pub use outline::{GlyphOutline, PathCommand};

/// Errors that can occur while loading a font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse font: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("Font reports zero units per em")]
    InvalidUnitsPerEm,
}

/// Glyph bounding box in pixels, y-up relative to the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl GlyphBounds {
    pub fn width(&self) -> f32 {
        (self.x_max - self.x_min).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y_max - self.y_min).max(0.0)
    }
}

/// Metrics and outline for one character at one pixel size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance in pixels.
    pub advance_width: f32,
    pub bounds: GlyphBounds,
    /// Outline drawn with its baseline origin at (0, 0), y-down.
    pub outline: GlyphOutline,
}

impl GlyphMetrics {
    /// Width of the inked area, used as the glyph's slot width before padding.
    pub fn natural_width(&self) -> f32 {
        self.bounds.width()
    }
}

/// Source of glyph metrics for the layout engine.
///
/// Implementations must be pure in `(ch, font_px)`: the font is loaded once and
/// never changes afterwards.
pub trait GlyphMetricsProvider {
    /// Metrics for `ch` rendered at `font_px` pixels per em.
    ///
    /// Characters the font cannot map fall back to its `.notdef` glyph.
    fn glyph(&self, ch: char, font_px: f32) -> GlyphMetrics;
}

impl<T: GlyphMetricsProvider + ?Sized> GlyphMetricsProvider for Box<T> {
    fn glyph(&self, ch: char, font_px: f32) -> GlyphMetrics {
        (**self).glyph(ch, font_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_width_never_negative() {
        let bounds = GlyphBounds {
            x_min: 10.0,
            y_min: 0.0,
            x_max: 4.0,
            y_max: 8.0,
        };
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 8.0);
    }

    #[test]
    fn test_natural_width_uses_bounding_box() {
        let metrics = GlyphMetrics {
            advance_width: 120.0,
            bounds: GlyphBounds {
                x_min: 8.0,
                y_min: 0.0,
                x_max: 108.0,
                y_max: 140.0,
            },
            outline: GlyphOutline::default(),
        };
        assert_eq!(metrics.natural_width(), 100.0);
    }
}
