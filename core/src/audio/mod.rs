//! Audio inputs and loudness analysis.
//!
//! This module provides:
//! - The [`AudioCapability`] / [`AudioStream`] boundary the session acquires audio through
//! - Byte-scaled spectrum analysis via RustFFT
//! - Loudness snapshots (volume plus per-slot bands)
//! - A sample feed for host capture callbacks and a decoded-clip input via Symphonia
//! - Synthetic test signals

pub mod bands;
pub mod clip;
pub mod feed;
pub mod fft;
#[cfg(feature = "clip-input")]
pub mod loader;
pub mod synth;

use thiserror::Error;

pub use bands::{AudioSnapshot, BAND_COUNT};
pub use clip::{ClipCapability, ClipStream, DecodedClip};
pub use feed::{FeedCapability, Permission, SampleFeed};
pub use fft::ByteSpectrumAnalyser;
#[cfg(feature = "clip-input")]
pub use loader::decode_clip;

/// Errors that can occur while acquiring or decoding audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio permission denied")]
    PermissionDenied,

    #[error("Audio input unavailable: {0}")]
    Unavailable(String),

    #[error("FFT size must be a power of two, got {0}")]
    InvalidFftSize(usize),

    #[error("Failed to open audio file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "clip-input")]
    #[error("Failed to decode audio: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("No audio track found in file")]
    NoAudioTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,
}

/// A live source of frequency data.
pub trait AudioStream: Send {
    /// Number of bins [`sample_frequencies`](Self::sample_frequencies) fills.
    fn bin_count(&self) -> usize;

    /// Write the current byte-scaled spectrum into `out`.
    fn sample_frequencies(&mut self, out: &mut [u8]);

    /// Stop the underlying input. Idempotent.
    fn close(&mut self);
}

/// Something that can hand out an [`AudioStream`], possibly after asking permission.
#[allow(async_fn_in_trait)]
pub trait AudioCapability {
    async fn request(&mut self) -> Result<Box<dyn AudioStream>, AudioError>;
}
