//! Bar effect: heights fall from left to right.

use super::{position_factor, EffectShape, HeightMapping};
use crate::layout::CAP;
use crate::signal::PointerPosition;

/// Slots that share the steep first ramp when the row is long.
const RAMP_SLOTS: usize = 8;

/// Tallest idle slot, at the reference size.
const PEAK: f32 = 600.0;
/// Height at the end of the first ramp.
const SHOULDER: f32 = 330.0;
/// Height at the end of the second ramp.
const TAIL: f32 = 200.0;

pub struct BarEffect;

impl HeightMapping for BarEffect {
    fn shape(&self) -> EffectShape {
        EffectShape::Bar
    }

    fn default_height(&self, index: usize, occupied: usize) -> f32 {
        if occupied <= RAMP_SLOTS {
            if occupied == 1 {
                return PEAK;
            }
            let step = (PEAK - SHOULDER) / (occupied - 1) as f32;
            return PEAK - step * index as f32;
        }

        if index < RAMP_SLOTS {
            let step = (PEAK - SHOULDER) / (RAMP_SLOTS - 1) as f32;
            PEAK - step * index as f32
        } else {
            let step = (SHOULDER - TAIL) / (CAP - RAMP_SLOTS - 1) as f32;
            (SHOULDER - step * (index - RAMP_SLOTS) as f32).max(TAIL)
        }
    }

    fn audio_impact(&self, index: usize, _occupied: usize, _bands: &[f32]) -> f32 {
        (1.0 - index as f32 / CAP as f32).max(0.2)
    }

    fn audio_gain(&self) -> f32 {
        2.5
    }

    fn pointer_factor(&self, index: usize, occupied: usize, pointer: PointerPosition) -> f32 {
        let influence = (pointer.x - position_factor(index, occupied)).abs();
        (1.0 - influence) * pointer.y
    }
}
