//! Effect lookup.

use super::{ArcEffect, BarEffect, EffectShape, HeightMapping, WaveEffect};

static BAR: BarEffect = BarEffect;
static WAVE: WaveEffect = WaveEffect;
static ARC: ArcEffect = ArcEffect;

/// Height mapping for a shape.
///
/// # Example
/// ```
/// use glyph_distort::effects::{effect, EffectShape, HeightMapping};
///
/// let mapping = effect(EffectShape::Wave);
/// assert_eq!(mapping.shape(), EffectShape::Wave);
/// ```
pub fn effect(shape: EffectShape) -> &'static dyn HeightMapping {
    match shape {
        EffectShape::Bar => &BAR,
        EffectShape::Wave => &WAVE,
        EffectShape::Arc => &ARC,
    }
}
