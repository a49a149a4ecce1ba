//! TrueType/OpenType glyph metrics via ttf-parser.

use std::path::Path;

use super::{FontError, GlyphBounds, GlyphMetrics, GlyphMetricsProvider, GlyphOutline, PathCommand};

/// A parsed font file.
///
/// Owns the raw font bytes; each metrics query re-parses the table directory,
/// which is cheap compared to outline extraction.
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Vec<u8>,
    units_per_em: u16,
    family_name: Option<String>,
}

impl FontFace {
    /// Parse a font from memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, 0)?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontError::InvalidUnitsPerEm);
        }
        let family_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|name| name.to_string());

        Ok(Self {
            data,
            units_per_em,
            family_name,
        })
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn scale(&self, font_px: f32) -> f32 {
        font_px / self.units_per_em as f32
    }
}

/// Load a font file from disk.
///
/// # Example
///
/// ```no_run
/// use glyph_distort::font::load_font;
///
/// let font = load_font("Assets/WiseSans.otf").unwrap();
/// println!("Loaded {:?}", font.family_name());
/// ```
pub fn load_font<P: AsRef<Path>>(path: P) -> Result<FontFace, FontError> {
    let data = std::fs::read(path.as_ref())?;
    let face = FontFace::from_bytes(data)?;
    log::info!(
        "Font loaded: {} ({} units/em)",
        face.family_name().unwrap_or("<unnamed>"),
        face.units_per_em
    );
    Ok(face)
}

impl GlyphMetricsProvider for FontFace {
    fn glyph(&self, ch: char, font_px: f32) -> GlyphMetrics {
        // The bytes were validated in `from_bytes`.
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return GlyphMetrics::default();
        };
        let scale = self.scale(font_px);
        let glyph_id = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));

        let bounds = face
            .glyph_bounding_box(glyph_id)
            .map(|rect| GlyphBounds {
                x_min: rect.x_min as f32 * scale,
                y_min: rect.y_min as f32 * scale,
                x_max: rect.x_max as f32 * scale,
                y_max: rect.y_max as f32 * scale,
            })
            .unwrap_or_default();

        let advance_width = face
            .glyph_hor_advance(glyph_id)
            .map(|advance| advance as f32 * scale)
            .unwrap_or(0.0);

        let mut builder = PixelOutlineBuilder::new(scale);
        let outline = match face.outline_glyph(glyph_id, &mut builder) {
            Some(_) => builder.finish(),
            None => GlyphOutline::default(),
        };

        GlyphMetrics {
            advance_width,
            bounds,
            outline,
        }
    }
}

/// Receives ttf-parser outline commands in font units and records them in
/// pixels, flipping Y so the baseline sits at y = 0 with ascenders negative.
struct PixelOutlineBuilder {
    scale: f32,
    outline: GlyphOutline,
}

impl PixelOutlineBuilder {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            outline: GlyphOutline::default(),
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale, -y * self.scale)
    }

    fn finish(self) -> GlyphOutline {
        self.outline
    }
}

impl ttf_parser::OutlineBuilder for PixelOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.outline.push(PathCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.outline.push(PathCommand::LineTo(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.outline.push(PathCommand::QuadTo(x1, y1, x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.outline.push(PathCommand::CubicTo(x1, y1, x2, y2, x, y));
    }

    fn close(&mut self) {
        self.outline.push(PathCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let err = FontFace::from_bytes(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_font("/no/such/font.otf").unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
    }

    #[test]
    fn test_outline_builder_scales_and_flips() {
        let mut builder = PixelOutlineBuilder::new(0.25);
        builder.move_to(0.0, 0.0);
        builder.line_to(100.0, 500.0);
        builder.quad_to(150.0, 600.0, 200.0, 500.0);
        builder.close();

        let outline = builder.finish();
        assert_eq!(
            outline.commands(),
            &[
                PathCommand::MoveTo(0.0, 0.0),
                PathCommand::LineTo(25.0, -125.0),
                PathCommand::QuadTo(37.5, -150.0, 50.0, -125.0),
                PathCommand::Close,
            ]
        );
    }
}
