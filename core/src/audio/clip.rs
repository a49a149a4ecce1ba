//! Decoded clip input: a fixed buffer played through one hop per tick.

#[cfg(feature = "clip-input")]
use std::path::PathBuf;

use log::info;

use super::fft::ByteSpectrumAnalyser;
use super::{AudioCapability, AudioError, AudioStream};

/// Ticks per second a clip is paced for.
pub const CLIP_TICK_RATE: u32 = 60;

/// Mono audio decoded into memory.
#[derive(Debug, Clone)]
pub struct DecodedClip {
    /// Mono samples, -1.0..=1.0.
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Average interleaved frames down to mono.
    pub fn from_interleaved(interleaved: &[f32], channels: usize, sample_rate: u32) -> Self {
        let samples = if channels <= 1 {
            interleaved.to_vec()
        } else {
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
                .collect()
        };
        Self::new(samples, sample_rate)
    }
}

enum ClipSource {
    Decoded(DecodedClip),
    #[cfg(feature = "clip-input")]
    File(PathBuf),
}

/// Capability that plays a clip instead of live capture.
pub struct ClipCapability {
    source: ClipSource,
    fft_size: usize,
}

impl ClipCapability {
    /// Play an already decoded clip.
    pub fn from_clip(clip: DecodedClip, fft_size: usize) -> Self {
        Self {
            source: ClipSource::Decoded(clip),
            fft_size,
        }
    }

    /// Decode `path` when the stream is requested.
    #[cfg(feature = "clip-input")]
    pub fn open(path: impl Into<PathBuf>, fft_size: usize) -> Self {
        Self {
            source: ClipSource::File(path.into()),
            fft_size,
        }
    }

    fn decode(&self) -> Result<DecodedClip, AudioError> {
        match &self.source {
            ClipSource::Decoded(clip) => Ok(clip.clone()),
            #[cfg(feature = "clip-input")]
            ClipSource::File(path) => super::loader::decode_clip(path),
        }
    }
}

impl AudioCapability for ClipCapability {
    async fn request(&mut self) -> Result<Box<dyn AudioStream>, AudioError> {
        let clip = self.decode()?;
        if clip.sample_rate == 0 {
            return Err(AudioError::UnknownSampleRate);
        }
        let analyser = ByteSpectrumAnalyser::new(self.fft_size)?;
        info!(
            "Clip stream opened: {:.2}s at {} Hz",
            clip.duration(),
            clip.sample_rate
        );
        Ok(Box::new(ClipStream::new(clip, analyser)))
    }
}

/// Stream over a decoded clip, advancing one hop per read.
pub struct ClipStream {
    clip: DecodedClip,
    analyser: ByteSpectrumAnalyser,
    position: usize,
    hop: usize,
    closed: bool,
}

impl ClipStream {
    fn new(clip: DecodedClip, analyser: ByteSpectrumAnalyser) -> Self {
        let hop = (clip.sample_rate / CLIP_TICK_RATE).max(1) as usize;
        Self {
            clip,
            analyser,
            position: 0,
            hop,
            closed: false,
        }
    }

    /// True once every sample has been played.
    pub fn is_finished(&self) -> bool {
        self.closed || self.position >= self.clip.samples.len()
    }
}

impl AudioStream for ClipStream {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn sample_frequencies(&mut self, out: &mut [u8]) {
        let window: &[f32] = if self.is_finished() {
            &[]
        } else {
            self.position = (self.position + self.hop).min(self.clip.samples.len());
            &self.clip.samples[..self.position]
        };
        self.analyser.process(window, out);
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
