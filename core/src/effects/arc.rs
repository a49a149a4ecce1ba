//! Arc effect: heights dip at the middle of the row and rise at the edges.

use super::{
    distance_from_middle, fallback_step, middle_ramp, position_factor, EffectShape, HeightMapping,
    FALLBACK_HALF, RAMP_HIGH, RAMP_LOW,
};
use crate::layout::CAP;
use crate::signal::PointerPosition;

pub struct ArcEffect;

impl HeightMapping for ArcEffect {
    fn shape(&self) -> EffectShape {
        EffectShape::Arc
    }

    fn default_height(&self, index: usize, occupied: usize) -> f32 {
        let height = if occupied <= CAP {
            let (middle, fall, rise) = middle_ramp(occupied);
            if index < middle {
                RAMP_HIGH - fall * index as f32
            } else {
                RAMP_LOW + rise * (index - middle) as f32
            }
        } else {
            let step = fallback_step();
            if index < FALLBACK_HALF {
                RAMP_HIGH - step * index as f32
            } else {
                RAMP_LOW + step * (index - FALLBACK_HALF) as f32
            }
        };
        height.clamp(RAMP_LOW, RAMP_HIGH)
    }

    fn audio_impact(&self, index: usize, occupied: usize, _bands: &[f32]) -> f32 {
        distance_from_middle(index, occupied) / FALLBACK_HALF as f32
    }

    fn audio_gain(&self) -> f32 {
        2.0
    }

    // Vertical axis is inverted: moving the pointer up distorts more.
    fn pointer_factor(&self, index: usize, occupied: usize, pointer: PointerPosition) -> f32 {
        let position = position_factor(index, occupied);
        let distance_from_edge = position.min(1.0 - position) * 2.0;
        let edge_factor = 1.0 - distance_from_edge;
        let influence = 1.0 - (pointer.x - position).abs();
        influence * (1.0 - pointer.y) * edge_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_row_dips_in_middle() {
        let heights: Vec<f32> = (0..5).map(|i| ArcEffect.default_height(i, 5)).collect();
        assert_eq!(heights, vec![600.0, 400.0, 200.0, 400.0, 600.0]);
    }

    #[test]
    fn test_single_letter_is_valley() {
        assert_eq!(ArcEffect.default_height(0, 1), 200.0);
    }

    #[test]
    fn test_audio_impact_grows_toward_edges() {
        assert_eq!(ArcEffect.audio_impact(3, 7, &[]), 0.0);
        assert_eq!(ArcEffect.audio_impact(0, 14, &[]), 1.0);
    }

    #[test]
    fn test_pointer_factor_inverted_vertical() {
        let top = PointerPosition::new(0.0, 0.0);
        assert_eq!(ArcEffect.pointer_factor(0, 5, top), 1.0);
        let bottom = PointerPosition::new(0.0, 1.0);
        assert_eq!(ArcEffect.pointer_factor(0, 5, bottom), 0.0);
        // Middle slot has no edge weight
        assert_eq!(ArcEffect.pointer_factor(2, 5, PointerPosition::new(0.5, 0.0)), 0.0);
    }
}
