//! Wave effect: heights peak at the middle of the row.

use super::{
    distance_from_middle, fallback_step, middle_ramp, position_factor, EffectShape, HeightMapping,
    FALLBACK_HALF, RAMP_HIGH, RAMP_LOW,
};
use crate::layout::CAP;
use crate::signal::PointerPosition;

pub struct WaveEffect;

impl HeightMapping for WaveEffect {
    fn shape(&self) -> EffectShape {
        EffectShape::Wave
    }

    fn default_height(&self, index: usize, occupied: usize) -> f32 {
        let height = if occupied <= CAP {
            let (middle, rise, fall) = middle_ramp(occupied);
            if index < middle {
                RAMP_LOW + rise * index as f32
            } else {
                RAMP_HIGH - fall * (index - middle) as f32
            }
        } else {
            let step = fallback_step();
            if index < FALLBACK_HALF {
                RAMP_LOW + step * index as f32
            } else {
                RAMP_HIGH - step * (index - FALLBACK_HALF) as f32
            }
        };
        height.max(RAMP_LOW)
    }

    fn audio_impact(&self, index: usize, occupied: usize, _bands: &[f32]) -> f32 {
        (1.0 - distance_from_middle(index, occupied) / FALLBACK_HALF as f32).max(0.0)
    }

    fn audio_gain(&self) -> f32 {
        2.0
    }

    fn pointer_factor(&self, index: usize, occupied: usize, pointer: PointerPosition) -> f32 {
        let position = position_factor(index, occupied);
        let distance_from_center = (position - 0.5).abs() * 2.0;
        let influence = 1.0 - (pointer.x - position).abs();
        influence * pointer.y * (1.0 - distance_from_center * 0.5)
    }
}
