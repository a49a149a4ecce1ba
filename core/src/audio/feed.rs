//! Sample feed: PCM pushed in by a host capture callback.
//!
//! The host keeps a [`SampleFeed`] handle and pushes blocks of mono samples
//! from its capture thread. A [`FeedCapability`] hands out a stream over the
//! same buffer once permission is granted; closing the stream deactivates the
//! feed so the host can tell capture should stop.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};

use super::fft::ByteSpectrumAnalyser;
use super::{AudioCapability, AudioError, AudioStream};

struct FeedState {
    samples: VecDeque<f32>,
    capacity: usize,
    active: bool,
}

/// Shared ring buffer of the most recent samples.
#[derive(Clone)]
pub struct SampleFeed {
    state: Arc<Mutex<FeedState>>,
}

impl SampleFeed {
    /// Feed holding at most `capacity` samples. Starts inactive.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState {
                samples: VecDeque::with_capacity(capacity),
                capacity,
                active: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // A panicking pusher leaves plain sample data behind
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append samples. Returns `false` (and drops them) while inactive.
    pub fn push(&self, block: &[f32]) -> bool {
        let mut state = self.lock();
        if !state.active {
            return false;
        }
        let capacity = state.capacity;
        let skip = block.len().saturating_sub(capacity);
        state.samples.extend(&block[skip..]);
        let excess = state.samples.len().saturating_sub(capacity);
        state.samples.drain(..excess);
        true
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.lock().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_active(&self, active: bool) {
        let mut state = self.lock();
        state.active = active;
        if !active {
            state.samples.clear();
        }
    }

    fn copy_into(&self, out: &mut Vec<f32>) {
        let state = self.lock();
        out.clear();
        out.extend(state.samples.iter().copied());
    }
}

/// Whether the host grants access to its capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Capability backed by a [`SampleFeed`].
pub struct FeedCapability {
    feed: SampleFeed,
    permission: Permission,
    fft_size: usize,
}

impl FeedCapability {
    pub fn new(feed: SampleFeed, permission: Permission, fft_size: usize) -> Self {
        Self {
            feed,
            permission,
            fft_size,
        }
    }

    /// Change the answer given to the next request.
    pub fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
    }

    pub fn feed(&self) -> &SampleFeed {
        &self.feed
    }
}

impl AudioCapability for FeedCapability {
    async fn request(&mut self) -> Result<Box<dyn AudioStream>, AudioError> {
        if self.permission == Permission::Denied {
            return Err(AudioError::PermissionDenied);
        }
        let analyser = ByteSpectrumAnalyser::new(self.fft_size)?;
        self.feed.set_active(true);
        info!("Sample feed opened ({} point analysis)", self.fft_size);
        Ok(Box::new(FeedStream {
            feed: self.feed.clone(),
            analyser,
            scratch: Vec::with_capacity(self.fft_size),
        }))
    }
}

struct FeedStream {
    feed: SampleFeed,
    analyser: ByteSpectrumAnalyser,
    scratch: Vec<f32>,
}

impl AudioStream for FeedStream {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn sample_frequencies(&mut self, out: &mut [u8]) {
        self.feed.copy_into(&mut self.scratch);
        self.analyser.process(&self.scratch, out);
    }

    fn close(&mut self) {
        if self.feed.is_active() {
            debug!("Sample feed closed");
        }
        self.feed.set_active(false);
    }
}

impl Drop for FeedStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::sine;

    #[test]
    fn test_inactive_feed_drops_samples() {
        let feed = SampleFeed::new(256);
        assert!(!feed.push(&[0.5; 64]));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_feed_keeps_most_recent() {
        let feed = SampleFeed::new(4);
        feed.set_active(true);
        assert!(feed.push(&[1.0, 2.0, 3.0]));
        assert!(feed.push(&[4.0, 5.0, 6.0]));
        let mut out = Vec::new();
        feed.copy_into(&mut out);
        assert_eq!(out, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_denied_request() {
        let mut capability = FeedCapability::new(SampleFeed::new(256), Permission::Denied, 256);
        let result = pollster::block_on(capability.request());
        assert!(matches!(result, Err(AudioError::PermissionDenied)));
        assert!(!capability.feed().is_active());
    }

    #[test]
    fn test_close_deactivates_feed() {
        let feed = SampleFeed::new(256);
        let mut capability = FeedCapability::new(feed.clone(), Permission::Granted, 256);
        let mut stream = pollster::block_on(capability.request()).unwrap();
        assert!(feed.is_active());
        assert!(feed.push(&sine(1000.0, 44100, 256, 1.0)));

        let mut bins = vec![0u8; stream.bin_count()];
        stream.sample_frequencies(&mut bins);
        assert!(bins.iter().any(|&b| b > 0));

        stream.close();
        stream.close();
        assert!(!feed.is_active());
        assert!(!feed.push(&[1.0; 16]));
    }
}
