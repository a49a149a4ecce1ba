//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glyph_distort::audio::{AudioCapability, AudioError, AudioStream};
use glyph_distort::font::{GlyphBounds, GlyphMetrics, GlyphOutline, PathCommand};
use glyph_distort::{EngineConfig, GlyphMetricsProvider, Session};

/// Every glyph is a filled box `0.5em` wide and `0.7em` tall on the baseline.
pub struct BoxFont;

impl GlyphMetricsProvider for BoxFont {
    fn glyph(&self, _ch: char, font_px: f32) -> GlyphMetrics {
        box_glyph(font_px)
    }
}

pub fn box_glyph(font_px: f32) -> GlyphMetrics {
    let w = font_px * 0.5;
    let h = font_px * 0.7;
    GlyphMetrics {
        advance_width: font_px * 0.6,
        bounds: GlyphBounds {
            x_min: 0.0,
            y_min: 0.0,
            x_max: w,
            y_max: h,
        },
        outline: GlyphOutline::new(vec![
            PathCommand::MoveTo(0.0, 0.0),
            PathCommand::LineTo(0.0, -h),
            PathCommand::LineTo(w, -h),
            PathCommand::LineTo(w, 0.0),
            PathCommand::Close,
        ]),
    }
}

/// [`BoxFont`] that records every character it is asked for.
#[derive(Default)]
pub struct CountingFont {
    pub requested: RefCell<Vec<char>>,
}

impl GlyphMetricsProvider for CountingFont {
    fn glyph(&self, ch: char, font_px: f32) -> GlyphMetrics {
        self.requested.borrow_mut().push(ch);
        box_glyph(font_px)
    }
}

/// Session over [`BoxFont`] with default configuration and `text` set.
pub fn box_session(text: &str) -> Session<BoxFont> {
    let mut session = Session::new(BoxFont, EngineConfig::default());
    session.set_text(text);
    session
}

/// Stream that reports every bin at a fixed byte level.
pub struct LevelStream {
    pub level: u8,
    pub closed: Arc<AtomicBool>,
}

impl AudioStream for LevelStream {
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

/// Microphone stand-in that grants or denies access.
pub struct FakeMic {
    pub level: u8,
    pub grant: bool,
    pub requests: usize,
    pub closed: Arc<AtomicBool>,
}

impl FakeMic {
    pub fn granting(level: u8) -> Self {
        Self {
            level,
            grant: true,
            requests: 0,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            ..Self::granting(0)
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl AudioCapability for FakeMic {
    async fn request(&mut self) -> Result<Box<dyn AudioStream>, AudioError> {
        self.requests += 1;
        if !self.grant {
            return Err(AudioError::PermissionDenied);
        }
        Ok(Box::new(LevelStream {
            level: self.level,
            closed: self.closed.clone(),
        }))
    }
}

/// Minimal 16-bit PCM mono WAV file.
pub fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

pub fn assert_close(actual: f32, expected: f32, eps: f32) {
    assert!(
        (actual - expected).abs() < eps,
        "expected {} got {}",
        expected,
        actual
    );
}
