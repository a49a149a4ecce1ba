//! Synthetic signals for feeding audio inputs in tests and demos.

use std::f32::consts::PI;

/// `frames` samples of a sine tone.
pub fn sine(frequency: f32, sample_rate: u32, frames: usize, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// `frames` samples of reproducible white noise.
pub fn white_noise(frames: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    // 64-bit LCG, top bits only
    let mut state = seed;
    (0..frames)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            amplitude * (unit * 2.0 - 1.0)
        })
        .collect()
}

/// Tone that is silent for the first half and loud for the second.
pub fn swell(frequency: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
    let mut samples = sine(frequency, sample_rate, frames, 1.0);
    let half = frames / 2;
    samples[..half].iter_mut().for_each(|s| *s = 0.0);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_amplitude() {
        let samples = sine(440.0, 44100, 4410, 0.5);
        assert_eq!(samples.len(), 4410);
        assert!(samples.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn test_noise_is_reproducible() {
        let a = white_noise(256, 1.0, 7);
        let b = white_noise(256, 1.0, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert_ne!(a, white_noise(256, 1.0, 8));
    }

    #[test]
    fn test_swell_starts_silent() {
        let samples = swell(440.0, 44100, 1000);
        assert!(samples[..500].iter().all(|&s| s == 0.0));
        assert!(samples[500..].iter().any(|&s| s.abs() > 0.5));
    }
}
