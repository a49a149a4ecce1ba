//! Presentation snapshot of the glyph row.
//!
//! A [`RowFrame`] is everything a renderer needs for one frame: per-slot width,
//! rounded height, the glyph outline and its viewport, the inter-slot gap and
//! the row alignment.

use crate::effects::{EffectShape, RowAlignment, ViewBox};
use crate::font::GlyphOutline;
use crate::layout::{Slot, SlotRow, CAP};

/// A drawable glyph inside a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphFrame {
    pub ch: char,
    pub outline: GlyphOutline,
    pub view_box: ViewBox,
}

/// One slot of the row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame {
    pub width: f32,
    /// Whole pixels.
    pub height: f32,
    /// `None` for spaces and empty slots.
    pub glyph: Option<GlyphFrame>,
}

impl SlotFrame {
    pub fn is_collapsed(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The whole row for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame {
    pub slots: Vec<SlotFrame>,
    pub occupied: usize,
    pub gap: f32,
    pub shape: EffectShape,
    pub alignment: RowAlignment,
    pub font_px: f32,
    pub fit_scale: f32,
}

impl RowFrame {
    /// Combine a laid-out row with per-slot heights.
    pub fn build(row: &SlotRow, heights: &[f32; CAP], shape: EffectShape) -> Self {
        let font_px = row.font_px();
        let slots = row
            .slots()
            .iter()
            .zip(heights)
            .map(|(slot, &height)| {
                let height = if slot.has_height() { height.round() } else { 0.0 };
                let glyph = match slot {
                    Slot::Glyph(g) => Some(GlyphFrame {
                        ch: g.ch,
                        outline: g.outline.clone(),
                        view_box: ViewBox::for_glyph(shape, g.padded_width, height, font_px),
                    }),
                    _ => None,
                };
                SlotFrame {
                    width: slot.width(),
                    height,
                    glyph,
                }
            })
            .collect();

        Self {
            slots,
            occupied: row.occupied(),
            gap: row.gap(),
            shape,
            alignment: RowAlignment::for_shape(shape),
            font_px,
            fit_scale: row.fit_scale(),
        }
    }

    pub fn heights(&self) -> Vec<f32> {
        self.slots.iter().map(|s| s.height).collect()
    }

    /// Width of the occupied slots plus the gaps between them.
    pub fn width(&self) -> f32 {
        let widths: f32 = self.slots.iter().map(|s| s.width).sum();
        widths + self.occupied.saturating_sub(1) as f32 * self.gap
    }

    /// Height of the tallest slot.
    pub fn height(&self) -> f32 {
        self.slots.iter().map(|s| s.height).fold(0.0, f32::max)
    }

    /// Whether any glyph would actually be drawn.
    pub fn has_visible_glyphs(&self) -> bool {
        self.slots
            .iter()
            .any(|s| !s.is_collapsed() && s.glyph.as_ref().is_some_and(|g| !g.outline.is_empty()))
    }

    /// Left edge of each slot, relative to the start of the row.
    pub fn slot_offsets(&self) -> Vec<f32> {
        let mut x = 0.0;
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let left = x;
                x += slot.width;
                if i + 1 < self.occupied {
                    x += self.gap;
                }
                left
            })
            .collect()
    }
}
