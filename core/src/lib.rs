//! Glyph Distort Core
//!
//! Real-time glyph distortion engine: lays a short text out into a row of
//! fixed glyph panels and stretches each panel's height from microphone
//! loudness or pointer position, in one of three shapes.
//!
//! # Features
//!
//! - Glyph metrics and outlines from TrueType/OpenType fonts via ttf-parser
//! - Responsive font sizing and fit-to-container slot layout
//! - Bar, wave and arc height mappings with idle patterns and baseline alignment
//! - Audio input through sample feeds or decoded clips (Symphonia), analysed with RustFFT
//! - Explicit tick scheduling and a single session object owning all state
//! - PNG export rasterized with tiny-skia
//!
//! # Example
//!
//! ```no_run
//! use glyph_distort::{EffectShape, EngineConfig, Session};
//!
//! let mut session = Session::with_font_file("Inter-Bold.ttf", EngineConfig::default());
//! session.set_viewport(1920.0, 1600.0);
//! session.set_text("hello");
//! session.set_shape(EffectShape::Wave);
//! let frame = session.frame();
//! println!("{:?}", frame.heights());
//! ```

pub mod audio;
pub mod config;
pub mod effects;
pub mod export;
pub mod font;
pub mod frame;
pub mod layout;
pub mod scheduler;
pub mod session;
pub mod signal;

// Re-export commonly used types
pub use audio::{AudioCapability, AudioError, AudioSnapshot, AudioStream};
pub use config::{parse_hex_color, ConfigError, EngineConfig, ExportConfig};
pub use effects::{default_height_for, height_for, EffectShape, HeightMapping, Sensitivity};
pub use export::{export_filename, Compositor, ExportError, ExportedImage};
pub use font::{load_font, FontError, FontFace, GlyphMetrics, GlyphMetricsProvider};
pub use frame::{RowFrame, SlotFrame};
pub use layout::{layout, Slot, SlotRow, CAP};
pub use scheduler::{LoopKind, TickScheduler};
pub use session::Session;
pub use signal::{PointerPosition, Signal, SignalMode, SurfaceRect};
