//! Height mapping for the distortion effects.
//!
//! Three shapes distribute height across the glyph row:
//! - Bar: tall on the left, tapering to the right
//! - Wave: peak in the middle
//! - Arc: valley in the middle, tall at the edges
//!
//! Each shape defines an idle pattern (a pure function of slot index and
//! occupied count) and how audio loudness or pointer position adds height on
//! top of the resting glyph size.

mod arc;
mod bar;
pub mod baseline;
mod registry;
mod wave;

pub use arc::ArcEffect;
pub use bar::BarEffect;
pub use baseline::{offset_for, RowAlignment, ViewBox};
pub use registry::effect;
pub use wave::WaveEffect;

use crate::audio::AudioSnapshot;
use crate::signal::{PointerPosition, Signal};

/// Design size the idle patterns are expressed in.
pub const REFERENCE_FONT_PX: f32 = 200.0;

/// Sensitivity multipliers for levels 1 through 5.
pub const SENSITIVITY_MULTIPLIERS: [f32; 5] = [1.5, 2.0, 2.5, 3.5, 5.0];

/// Available effect shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectShape {
    #[default]
    Bar,
    Wave,
    Arc,
}

impl EffectShape {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bar" | "bars" => Some(Self::Bar),
            "wave" => Some(Self::Wave),
            "arc" => Some(Self::Arc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Wave => "wave",
            Self::Arc => "arc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Bar => "Tall on the left, tapering to the right",
            Self::Wave => "Peak in the middle of the row",
            Self::Arc => "Valley in the middle, tall at the edges",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Bar, Self::Wave, Self::Arc]
    }
}

/// Sensitivity level from 1 (least) to 5 (most).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` for levels outside 1..=5.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Clamp any level into 1..=5.
    pub fn clamped(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn multiplier(&self) -> f32 {
        SENSITIVITY_MULTIPLIERS[(self.0 - Self::MIN) as usize]
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(3)
    }
}

/// Per-shape height distribution.
///
/// All methods are only called for occupied slots (`index < occupied`).
pub trait HeightMapping: Send + Sync {
    fn shape(&self) -> EffectShape;

    /// Idle height at the reference font size.
    fn default_height(&self, index: usize, occupied: usize) -> f32;

    /// How strongly loudness affects this slot.
    ///
    /// `bands` holds per-band energy; the built-in shapes only use volume.
    fn audio_impact(&self, index: usize, occupied: usize, bands: &[f32]) -> f32;

    /// Height gain applied to `adjusted volume * impact`.
    fn audio_gain(&self) -> f32;

    /// Distortion factor in 0..=1 for a pointer position.
    fn pointer_factor(&self, index: usize, occupied: usize, pointer: PointerPosition) -> f32;
}

/// Idle height for a slot, scaled from the reference design size to `base_height`.
///
/// Unoccupied slots collapse to zero.
pub fn default_height_for(
    index: usize,
    occupied: usize,
    shape: EffectShape,
    base_height: f32,
) -> f32 {
    if index >= occupied {
        return 0.0;
    }
    let scale = base_height / REFERENCE_FONT_PX;
    effect(shape).default_height(index, occupied) * scale
}

/// Reactive height for a slot under the current signal.
///
/// Never below `base_height` for occupied slots; unoccupied slots collapse to zero.
pub fn height_for(
    index: usize,
    occupied: usize,
    shape: EffectShape,
    signal: &Signal,
    sensitivity: Sensitivity,
    base_height: f32,
) -> f32 {
    if index >= occupied {
        return 0.0;
    }
    let mapping = effect(shape);
    let multiplier = match signal {
        Signal::Audio(snapshot) => audio_multiplier(mapping, index, occupied, snapshot, sensitivity),
        Signal::Pointer(pointer) => {
            let max_multiplier = 1.0 + sensitivity.multiplier() * 0.5;
            let factor = mapping.pointer_factor(index, occupied, *pointer);
            1.0 + factor * (max_multiplier - 1.0)
        }
    };
    (base_height * multiplier).max(base_height)
}

fn audio_multiplier(
    mapping: &dyn HeightMapping,
    index: usize,
    occupied: usize,
    snapshot: &AudioSnapshot,
    sensitivity: Sensitivity,
) -> f32 {
    let adjusted_volume = (snapshot.volume * sensitivity.multiplier()).min(1.0);
    let impact = mapping.audio_impact(index, occupied, &snapshot.bands);
    1.0 + adjusted_volume * impact * mapping.audio_gain()
}

/// Slot position along the row, 0 at the first slot and 1 at the last.
pub(crate) fn position_factor(index: usize, occupied: usize) -> f32 {
    index as f32 / occupied.saturating_sub(1).max(1) as f32
}

/// Lowest idle height of the middle-weighted shapes, at the reference size.
pub(crate) const RAMP_LOW: f32 = 200.0;
/// Highest idle height of the middle-weighted shapes, at the reference size.
pub(crate) const RAMP_HIGH: f32 = 600.0;
/// Slots on each side of the fixed pattern used when a row exceeds [`CAP`](crate::layout::CAP).
pub(crate) const FALLBACK_HALF: usize = 7;

/// Middle slot and per-slot steps for the two halves of a wave or arc ramp.
pub(crate) fn middle_ramp(occupied: usize) -> (usize, f32, f32) {
    let middle = occupied / 2;
    let span = RAMP_HIGH - RAMP_LOW;
    let first = span / middle.max(1) as f32;
    let second = span / occupied.saturating_sub(middle + 1).max(1) as f32;
    (middle, first, second)
}

/// Per-slot step of the fixed pattern for rows longer than [`CAP`](crate::layout::CAP).
pub(crate) fn fallback_step() -> f32 {
    (RAMP_HIGH - RAMP_LOW) / (FALLBACK_HALF - 1) as f32
}

/// Distance of a slot from the middle slot, in slots.
pub(crate) fn distance_from_middle(index: usize, occupied: usize) -> f32 {
    (index as f32 - (occupied / 2) as f32).abs()
}
