//! Baseline alignment.
//!
//! Glyph outlines are drawn with their baseline at `y = 0`. Each slot shows its
//! glyph through a viewport that spans the padded glyph width and one font size
//! of height, shifted up by a per-shape offset. The viewport is stretched into
//! the slot box, so the offset alone decides where the baseline lands as the
//! slot height changes.

use super::EffectShape;

/// Baseline-from-top ratio used by Bar and Wave.
const STANDARD_BASELINE: f32 = 0.71;
/// Lifted ratio for Arc so bottom-flush slots don't clip descenders.
const LIFTED_BASELINE: f32 = 0.985;

/// Vertical viewport offset for a slot, in pixels.
///
/// Constant in the slot height: growth stretches the glyph around a fixed baseline.
pub fn offset_for(shape: EffectShape, _slot_height: f32, font_px: f32) -> f32 {
    match shape {
        EffectShape::Bar | EffectShape::Wave => font_px * STANDARD_BASELINE,
        EffectShape::Arc => font_px * LIFTED_BASELINE,
    }
}

/// Glyph viewport in outline coordinates, shown stretched into the slot box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// Viewport for a glyph with the given padded width.
    pub fn for_glyph(shape: EffectShape, padded_width: f32, slot_height: f32, font_px: f32) -> Self {
        Self {
            min_x: 0.0,
            min_y: -offset_for(shape, slot_height, font_px),
            width: padded_width,
            height: font_px,
        }
    }

    /// SVG `viewBox` attribute value.
    pub fn to_attribute(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }

    /// Maps a point in outline coordinates into a `slot_width` x `slot_height` box.
    ///
    /// Non-uniform: the aspect ratio is not preserved.
    pub fn map_point(&self, x: f32, y: f32, slot_width: f32, slot_height: f32) -> (f32, f32) {
        let (sx, sy) = self.scale_into(slot_width, slot_height);
        ((x - self.min_x) * sx, (y - self.min_y) * sy)
    }

    /// Horizontal and vertical scale factors into a slot box.
    pub fn scale_into(&self, slot_width: f32, slot_height: f32) -> (f32, f32) {
        let sx = if self.width > 0.0 { slot_width / self.width } else { 0.0 };
        let sy = if self.height > 0.0 { slot_height / self.height } else { 0.0 };
        (sx, sy)
    }
}

/// Which edge of the row a slot is anchored to while it grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAlignment {
    Top,
    Center,
    Bottom,
}

impl RowAlignment {
    pub fn for_shape(shape: EffectShape) -> Self {
        match shape {
            EffectShape::Bar => Self::Top,
            EffectShape::Wave => Self::Center,
            EffectShape::Arc => Self::Bottom,
        }
    }

    /// Top of a slot of `slot_height` inside a row of `row_height`.
    pub fn slot_top(&self, row_height: f32, slot_height: f32) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => (row_height - slot_height) / 2.0,
            Self::Bottom => row_height - slot_height,
        }
    }
}
