//! Slot layout.
//!
//! Maps input text onto a fixed row of [`CAP`] slots. Each slot holds nothing,
//! a space, or a glyph with its measured width; the whole row shrinks by a
//! single fit scale so it never overflows its container.

pub mod sizing;

pub use sizing::{fit_scale, font_pixel_size, ResponsiveParams, ViewportContext};

use crate::config::EngineConfig;
use crate::font::{GlyphMetricsProvider, GlyphOutline};

/// Number of glyph panels in the row.
pub const CAP: usize = 14;

/// Content of one slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    /// Unoccupied; collapsed to zero width and height.
    #[default]
    Empty,
    /// A space character; occupies width but draws nothing.
    Space {
        /// Width after fit scaling.
        width: f32,
    },
    Glyph(GlyphSlot),
}

/// A slot holding a drawable glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSlot {
    pub ch: char,
    /// Inked width at the layout font size.
    pub natural_width: f32,
    /// `natural_width` plus padding; also the glyph viewport width.
    pub padded_width: f32,
    /// Width after fit scaling.
    pub width: f32,
    pub outline: GlyphOutline,
}

impl Slot {
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Slot::Empty)
    }

    /// Only glyph slots are stretched. Spaces keep their width at zero height.
    pub fn has_height(&self) -> bool {
        matches!(self, Slot::Glyph(_))
    }

    /// Rendered width of the slot.
    pub fn width(&self) -> f32 {
        match self {
            Slot::Empty => 0.0,
            Slot::Space { width } => *width,
            Slot::Glyph(glyph) => glyph.width,
        }
    }

    pub fn glyph(&self) -> Option<&GlyphSlot> {
        match self {
            Slot::Glyph(glyph) => Some(glyph),
            _ => None,
        }
    }
}

/// The laid-out glyph row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    slots: [Slot; CAP],
    occupied: usize,
    font_px: f32,
    fit_scale: f32,
    gap: f32,
}

impl SlotRow {
    /// A row with every slot collapsed.
    pub fn empty(font_px: f32) -> Self {
        Self {
            slots: Default::default(),
            occupied: 0,
            font_px,
            fit_scale: 1.0,
            gap: 0.0,
        }
    }

    pub fn slots(&self) -> &[Slot; CAP] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of leading slots holding a character.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn font_px(&self) -> f32 {
        self.font_px
    }

    pub fn fit_scale(&self) -> f32 {
        self.fit_scale
    }

    /// Gap between adjacent occupied slots, after fit scaling.
    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn responsive(&self) -> ResponsiveParams {
        ResponsiveParams {
            font_px: self.font_px,
            fit_scale: self.fit_scale,
        }
    }

    /// Whether any slot holds a drawable glyph.
    pub fn has_glyphs(&self) -> bool {
        self.slots.iter().any(|slot| slot.glyph().is_some())
    }

    /// Rendered width of the occupied slots plus the gaps between them.
    pub fn total_width(&self) -> f32 {
        let widths: f32 = self.slots.iter().map(Slot::width).sum();
        widths + self.occupied.saturating_sub(1) as f32 * self.gap
    }
}

/// Lay out `text` into a slot row.
///
/// The text is upper-cased and only its first [`CAP`] characters are measured;
/// anything beyond is never passed to the glyph provider.
pub fn layout<P: GlyphMetricsProvider + ?Sized>(
    text: &str,
    available_width: f32,
    font_px: f32,
    provider: &P,
    config: &EngineConfig,
) -> SlotRow {
    let mut row = SlotRow::empty(font_px);

    // Unscaled widths first; scaling needs the row total.
    let mut raw_total = 0.0;
    for (i, ch) in text.to_uppercase().chars().take(CAP).enumerate() {
        row.slots[i] = if ch == ' ' {
            Slot::Space {
                width: config.space_width,
            }
        } else {
            let metrics = provider.glyph(ch, font_px);
            let natural_width = metrics.natural_width();
            let padded_width = natural_width + config.glyph_padding;
            Slot::Glyph(GlyphSlot {
                ch,
                natural_width,
                padded_width,
                width: padded_width,
                outline: metrics.outline,
            })
        };
        raw_total += row.slots[i].width();
        row.occupied = i + 1;
    }

    if row.occupied == 0 {
        return row;
    }

    raw_total += (row.occupied - 1) as f32 * config.glyph_gap;
    let scale = fit_scale(raw_total, available_width);

    for slot in row.slots.iter_mut() {
        match slot {
            Slot::Empty => {}
            Slot::Space { width } => *width *= scale,
            Slot::Glyph(glyph) => glyph.width = glyph.padded_width * scale,
        }
    }
    row.fit_scale = scale;
    row.gap = config.glyph_gap * scale;

    log::debug!(
        "Laid out {} slots at {}px (fit scale {:.3}, raw width {:.1})",
        row.occupied,
        font_px,
        scale,
        raw_total
    );
    row
}
