//! Audio signal: loudness read from the attached stream each tick.

use log::debug;

use super::{Signal, SignalSource};
use crate::audio::{AudioSnapshot, AudioStream};

/// Reads an [`AudioSnapshot`] per tick from an optional stream.
///
/// Without a stream every snapshot is silent.
#[derive(Default)]
pub struct AudioSignal {
    stream: Option<Box<dyn AudioStream>>,
    bins: Vec<u8>,
    last: AudioSnapshot,
}

impl AudioSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a stream, closing any previous one.
    pub fn attach(&mut self, stream: Box<dyn AudioStream>) {
        self.release();
        self.bins = vec![0; stream.bin_count()];
        self.stream = Some(stream);
    }

    /// Close and drop the stream. Idempotent.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.close();
            debug!("Audio stream released");
        }
        self.last = AudioSnapshot::silent();
    }

    pub fn is_enabled(&self) -> bool {
        self.stream.is_some()
    }

    /// Snapshot from the most recent read.
    pub fn last(&self) -> AudioSnapshot {
        self.last
    }

    /// Read a fresh snapshot from the stream.
    pub fn sample(&mut self) -> AudioSnapshot {
        self.last = match self.stream.as_mut() {
            Some(stream) => {
                stream.sample_frequencies(&mut self.bins);
                AudioSnapshot::from_bins(&self.bins)
            }
            None => AudioSnapshot::silent(),
        };
        self.last
    }
}

impl SignalSource for AudioSignal {
    fn snapshot(&mut self) -> Signal {
        Signal::Audio(self.sample())
    }
}

impl Drop for AudioSignal {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Constant {
        level: u8,
        closed: Arc<AtomicBool>,
    }

    impl AudioStream for Constant {
        fn bin_count(&self) -> usize {
            128
        }

        fn sample_frequencies(&mut self, out: &mut [u8]) {
            out.fill(self.level);
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_no_stream_is_silent() {
        let mut signal = AudioSignal::new();
        assert!(!signal.is_enabled());
        assert_eq!(signal.snapshot(), Signal::Audio(AudioSnapshot::silent()));
    }

    #[test]
    fn test_reads_attached_stream() {
        let closed = Arc::new(AtomicBool::new(false));
        let mut signal = AudioSignal::new();
        signal.attach(Box::new(Constant {
            level: 255,
            closed: closed.clone(),
        }));
        assert!(signal.is_enabled());
        assert_eq!(signal.sample().volume, 1.0);
        assert_eq!(signal.last().volume, 1.0);

        signal.release();
        signal.release();
        assert!(closed.load(Ordering::SeqCst));
        assert!(!signal.is_enabled());
        assert_eq!(signal.last(), AudioSnapshot::silent());
    }

    #[test]
    fn test_attach_closes_previous() {
        let first = Arc::new(AtomicBool::new(false));
        let mut signal = AudioSignal::new();
        signal.attach(Box::new(Constant {
            level: 0,
            closed: first.clone(),
        }));
        signal.attach(Box::new(Constant {
            level: 0,
            closed: Arc::new(AtomicBool::new(false)),
        }));
        assert!(first.load(Ordering::SeqCst));
    }
}
