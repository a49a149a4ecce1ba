//! The distortion session.
//!
//! A [`Session`] owns every piece of mutable state: the loaded font, the text
//! and its slot layout, the active shape, sensitivity and signal mode, the
//! pointer position, the audio stream and the tick scheduler. Hosts forward
//! input events to it, call [`Session::tick`] once per animation frame and read
//! [`Session::frame`] to draw.
//!
//! Every shape or mode switch follows the same order: cancel the running loop,
//! reset all slots to the idle pattern, then start the incoming loop.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error, info, warn};

use crate::audio::{AudioCapability, AudioError};
use crate::config::EngineConfig;
use crate::effects::{default_height_for, height_for, EffectShape, Sensitivity};
use crate::export::{Compositor, ExportError, ExportedImage};
use crate::font::{load_font, FontFace, GlyphMetricsProvider};
use crate::frame::RowFrame;
use crate::layout::{font_pixel_size, layout, ResponsiveParams, Slot, SlotRow, ViewportContext, CAP};
use crate::scheduler::{LoopKind, TickScheduler};
use crate::signal::{
    AudioSignal, PointerPosition, PointerSignal, Signal, SignalMode, SignalSource, SurfaceRect,
};

/// Distortion engine state for one text row.
pub struct Session<P = FontFace> {
    config: EngineConfig,
    provider: Option<P>,
    text: String,
    viewport: ViewportContext,
    row: SlotRow,
    heights: [f32; CAP],
    shape: EffectShape,
    sensitivity: Sensitivity,
    mode: SignalMode,
    audio: AudioSignal,
    pointer: PointerSignal,
    pointer_over: bool,
    scheduler: TickScheduler,
}

impl Session<FontFace> {
    /// Load the font at `path`.
    ///
    /// A font that fails to load leaves the session unavailable rather than
    /// failing: layout, reactive modes and export all stay inert.
    pub fn with_font_file<Q: AsRef<Path>>(path: Q, config: EngineConfig) -> Self {
        let path = path.as_ref();
        match load_font(path) {
            Ok(face) => Self::new(face, config),
            Err(e) => {
                error!("Failed to load font {}: {}", path.display(), e);
                Self::unavailable(config)
            }
        }
    }
}

impl<P: GlyphMetricsProvider> Session<P> {
    pub fn new(provider: P, config: EngineConfig) -> Self {
        Self::build(Some(provider), config)
    }

    /// A session without a font.
    pub fn unavailable(config: EngineConfig) -> Self {
        Self::build(None, config)
    }

    fn build(provider: Option<P>, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid engine configuration ({}), using defaults", e);
                EngineConfig::default()
            }
        };
        let viewport = ViewportContext::default();
        let font_px = font_pixel_size(viewport.width, &config);
        Self {
            sensitivity: Sensitivity::clamped(config.initial_sensitivity),
            config,
            provider,
            text: String::new(),
            viewport,
            row: SlotRow::empty(font_px),
            heights: [0.0; CAP],
            shape: EffectShape::default(),
            mode: SignalMode::None,
            audio: AudioSignal::new(),
            pointer: PointerSignal::new(),
            pointer_over: false,
            scheduler: TickScheduler::new(),
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Whether a font is loaded.
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn row(&self) -> &SlotRow {
        &self.row
    }

    pub fn shape(&self) -> EffectShape {
        self.shape
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio.is_enabled()
    }

    pub fn pointer_position(&self) -> PointerPosition {
        self.pointer.position()
    }

    /// The loop that [`tick`](Self::tick) currently drives.
    pub fn active_loop(&self) -> Option<LoopKind> {
        self.scheduler.active()
    }

    pub fn responsive(&self) -> ResponsiveParams {
        self.row.responsive()
    }

    /// Current per-slot heights, unrounded.
    pub fn heights(&self) -> &[f32; CAP] {
        &self.heights
    }

    /// Snapshot of the row for drawing.
    pub fn frame(&self) -> RowFrame {
        RowFrame::build(&self.row, &self.heights, self.shape)
    }

    // ========================================================================
    // Text and viewport
    // ========================================================================

    /// Replace the text. An empty string behaves like [`clear_text`](Self::clear_text).
    ///
    /// A running loop keeps running against the new layout.
    pub fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            self.clear_text();
            return;
        }
        self.text = text.to_string();
        self.refresh();
    }

    /// Clear the text, stop any loop and collapse every slot.
    pub fn clear_text(&mut self) {
        self.text.clear();
        self.scheduler.stop();
        self.row = SlotRow::empty(self.row.font_px());
        self.heights = [0.0; CAP];
    }

    /// Update the viewport and container widths and relayout.
    pub fn set_viewport(&mut self, width: f32, container_width: f32) {
        self.viewport = ViewportContext::new(width, container_width);
        self.refresh();
    }

    fn relayout(&mut self) {
        let font_px = font_pixel_size(self.viewport.width, &self.config);
        self.row = match &self.provider {
            Some(provider) if !self.text.is_empty() => layout(
                &self.text,
                self.viewport.available_width(&self.config),
                font_px,
                provider,
                &self.config,
            ),
            _ => SlotRow::empty(font_px),
        };
        debug!(
            "Relayout: {} slots at {}px, fit {:.3}",
            self.row.occupied(),
            font_px,
            self.row.fit_scale()
        );
    }

    /// Relayout, then bring heights in line with the new row.
    fn refresh(&mut self) {
        self.relayout();
        self.resume_loop();
        if !self.tick() {
            self.reset_to_default();
        }
    }

    // ========================================================================
    // Shape and sensitivity
    // ========================================================================

    pub fn set_shape(&mut self, shape: EffectShape) {
        if shape == self.shape {
            return;
        }
        debug!("Shape {} -> {}", self.shape.name(), shape.name());
        let running = self.scheduler.stop();
        self.shape = shape;
        self.reset_to_default();
        if let Some(kind) = running {
            self.scheduler.start(kind);
        }
    }

    /// Set the sensitivity level; out-of-range levels are clamped to 1..=5.
    pub fn set_sensitivity(&mut self, level: u8) {
        self.sensitivity = Sensitivity::clamped(level);
    }

    // ========================================================================
    // Signal modes
    // ========================================================================

    /// Switch to audio mode, requesting a stream if none is open.
    ///
    /// On failure the session stays usable: audio remains disabled, the mode
    /// reverts to [`SignalMode::None`] and the idle pattern is shown.
    pub async fn select_audio<C: AudioCapability>(
        &mut self,
        capability: &mut C,
    ) -> Result<(), AudioError> {
        self.scheduler.stop();
        self.mode = SignalMode::None;
        self.reset_to_default();

        if !self.audio.is_enabled() {
            match capability.request().await {
                Ok(stream) => {
                    info!("Audio input enabled ({} bins)", stream.bin_count());
                    self.audio.attach(stream);
                }
                Err(e) => {
                    warn!("Audio input unavailable: {}", e);
                    return Err(e);
                }
            }
        }

        debug!("Mode -> {}", SignalMode::Audio.name());
        self.mode = SignalMode::Audio;
        self.resume_loop();
        Ok(())
    }

    /// Blocking variant of [`select_audio`](Self::select_audio).
    pub fn select_audio_blocking<C: AudioCapability>(
        &mut self,
        capability: &mut C,
    ) -> Result<(), AudioError> {
        pollster::block_on(self.select_audio(capability))
    }

    /// Switch to pointer mode. The audio stream stays open but idle.
    pub fn select_pointer(&mut self) {
        self.scheduler.stop();
        debug!("Mode -> {}", SignalMode::Pointer.name());
        self.mode = SignalMode::Pointer;
        self.reset_to_default();
        self.resume_loop();
    }

    /// Close the audio stream. Leaves audio mode if it was active.
    pub fn release_audio(&mut self) {
        self.audio.release();
        if self.mode == SignalMode::Audio {
            self.scheduler.stop();
            self.mode = SignalMode::None;
            self.reset_to_default();
        }
    }

    /// Start the loop the current mode calls for, if it can run.
    fn resume_loop(&mut self) {
        let wanted = match self.mode {
            SignalMode::Audio if self.audio.is_enabled() => Some(LoopKind::Audio),
            SignalMode::Pointer if self.pointer_over => Some(LoopKind::Pointer),
            _ => None,
        };
        match wanted {
            Some(kind) if self.row.has_glyphs() => {
                self.scheduler.start(kind);
            }
            _ => {
                self.scheduler.stop();
            }
        }
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    /// Pointer entered the reactive surface.
    pub fn pointer_enter(&mut self) {
        self.pointer_over = true;
        if self.mode == SignalMode::Pointer {
            self.resume_loop();
        }
    }

    /// Touch began on the surface: records the initial position, then enters.
    pub fn touch_start(&mut self, client_x: f32, client_y: f32, rect: SurfaceRect) {
        if self.mode == SignalMode::Pointer {
            self.pointer.record(client_x, client_y, rect);
        }
        self.pointer_enter();
    }

    /// Pointer moved over the surface. Ignored unless tracking.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, rect: SurfaceRect) {
        if self.mode == SignalMode::Pointer && self.pointer_over {
            self.pointer.record(client_x, client_y, rect);
        }
    }

    /// Pointer left the surface (or touch ended).
    pub fn pointer_leave(&mut self) {
        self.pointer_over = false;
        if self.mode == SignalMode::Pointer {
            self.scheduler.stop();
            self.reset_to_default();
        }
    }

    // ========================================================================
    // Ticking
    // ========================================================================

    /// Run one tick of the active loop. Returns whether a tick ran.
    pub fn tick(&mut self) -> bool {
        let Some(kind) = self.scheduler.active() else {
            return false;
        };
        let signal = match kind {
            LoopKind::Audio => self.audio.snapshot(),
            LoopKind::Pointer => self.pointer.snapshot(),
        };
        let row = &self.row;
        let heights = &mut self.heights;
        let (shape, sensitivity) = (self.shape, self.sensitivity);
        self.scheduler
            .run(kind, || apply_signal(row, heights, shape, sensitivity, &signal))
    }

    /// Put every slot back on the idle pattern for the current shape.
    pub fn reset_to_default(&mut self) {
        let occupied = self.row.occupied();
        let base = self.row.font_px();
        let slots = self.row.slots().iter();
        for (i, (height, slot)) in self.heights.iter_mut().zip(slots).enumerate() {
            *height = if slot.has_height() {
                default_height_for(i, occupied, self.shape, base)
            } else {
                0.0
            };
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Whether an export would produce an image.
    pub fn can_export(&self) -> bool {
        self.row
            .slots()
            .iter()
            .zip(&self.heights)
            .any(|(slot, &height)| match slot {
                Slot::Glyph(glyph) => {
                    !glyph.outline.is_empty() && glyph.width > 0.0 && height.round() > 0.0
                }
                _ => false,
            })
    }

    /// Export the current frame as PNG, named with the current time.
    ///
    /// Returns `Ok(None)` with a logged warning when nothing is visible.
    pub fn export(&self) -> Result<Option<ExportedImage>, ExportError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.export_at(millis)
    }

    /// Export with an explicit timestamp for the file name.
    pub fn export_at(&self, unix_millis: u128) -> Result<Option<ExportedImage>, ExportError> {
        if !self.can_export() {
            warn!("Export skipped: no visible text");
            return Ok(None);
        }
        let compositor = Compositor::new(&self.config.export)?;
        let image = compositor.export(&self.frame(), &self.text, unix_millis)?;
        if let Some(image) = &image {
            info!("Exported {} ({}x{})", image.filename, image.width, image.height);
        }
        Ok(image)
    }
}

fn apply_signal(
    row: &SlotRow,
    heights: &mut [f32; CAP],
    shape: EffectShape,
    sensitivity: Sensitivity,
    signal: &Signal,
) {
    let occupied = row.occupied();
    let base = row.font_px();
    for (i, (height, slot)) in heights.iter_mut().zip(row.slots()).enumerate() {
        *height = if slot.has_height() {
            height_for(i, occupied, shape, signal, sensitivity, base)
        } else {
            0.0
        };
    }
}
