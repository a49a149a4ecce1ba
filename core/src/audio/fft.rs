//! Byte-scaled spectrum analysis using RustFFT.
//!
//! Mirrors the behaviour of a browser analyser node: Blackman window, temporal
//! smoothing of magnitudes, and a decibel range mapped onto 0..=255.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::AudioError;

/// Default analysis size.
pub const DEFAULT_FFT_SIZE: usize = 256;
/// Default weight of the previous frame when smoothing.
pub const DEFAULT_SMOOTHING: f32 = 0.8;
/// Level mapped to byte 0.
pub const MIN_DECIBELS: f32 = -100.0;
/// Level mapped to byte 255.
pub const MAX_DECIBELS: f32 = -30.0;

/// Spectrum analyser producing `fft_size / 2` byte bins per frame.
pub struct ByteSpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    smoothing: f32,
    smoothed: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl ByteSpectrumAnalyser {
    /// Create an analyser for a power-of-two `fft_size`.
    pub fn new(fft_size: usize) -> Result<Self, AudioError> {
        if fft_size < 2 || !fft_size.is_power_of_two() {
            return Err(AudioError::InvalidFftSize(fft_size));
        }

        let window = blackman_window(fft_size);
        let fft = FftPlanner::new().plan_fft_forward(fft_size);

        Ok(Self {
            fft,
            fft_size,
            window,
            smoothing: DEFAULT_SMOOTHING,
            smoothed: vec![0.0; fft_size / 2],
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
        })
    }

    /// Set the smoothing weight, clamped to 0..=1.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins per frame.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Frequency in Hz at the start of a bin.
    pub fn bin_to_freq(&self, bin: usize, sample_rate: u32) -> f32 {
        bin as f32 * sample_rate as f32 / self.fft_size as f32
    }

    /// Forget smoothing history.
    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|m| *m = 0.0);
    }

    /// Analyse the most recent `fft_size` samples into `out`.
    ///
    /// Shorter input is treated as preceded by silence. At most
    /// [`bin_count`](Self::bin_count) bytes of `out` are written.
    pub fn process(&mut self, samples: &[f32], out: &mut [u8]) {
        let recent = &samples[samples.len().saturating_sub(self.fft_size)..];
        let lead = self.fft_size - recent.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < lead { 0.0 } else { recent[i - lead] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let scale = 1.0 / self.fft_size as f32;
        let range = MAX_DECIBELS - MIN_DECIBELS;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() * scale;
            *smoothed = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;

            if let Some(byte) = out.get_mut(k) {
                let db = 20.0 * smoothed.max(1e-12).log10();
                let level = (255.0 / range * (db - MIN_DECIBELS)).floor();
                *byte = level.clamp(0.0, 255.0) as u8;
            }
        }
    }
}

fn blackman_window(size: usize) -> Vec<f32> {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    (0..size)
        .map(|i| {
            let t = i as f32 / size as f32;
            A0 - A1 * (2.0 * PI * t).cos() + A2 * (4.0 * PI * t).cos()
        })
        .collect()
}
