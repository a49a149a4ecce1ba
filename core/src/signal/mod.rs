//! Distortion signal sources.
//!
//! Exactly one source drives the heights at a time: loudness from an audio
//! stream, or the last known pointer position over the reactive surface.

mod audio;
mod pointer;

pub use audio::AudioSignal;
pub use pointer::{PointerPosition, PointerSignal, SurfaceRect};

use crate::audio::AudioSnapshot;

/// One tick's worth of signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Audio(AudioSnapshot),
    Pointer(PointerPosition),
}

/// Which source drives the heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignalMode {
    /// Idle pattern, nothing reactive.
    #[default]
    None,
    Audio,
    Pointer,
}

impl SignalMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Audio => "audio",
            Self::Pointer => "pointer",
        }
    }
}

/// Produces a signal snapshot each tick.
///
/// Snapshots are always valid: a source with nothing to read yields its default.
pub trait SignalSource {
    fn snapshot(&mut self) -> Signal;
}
