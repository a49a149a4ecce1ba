//! Engine configuration.
//!
//! Layout, sizing and export constants live here so hosts can tune them from a
//! JSON file. The shape formulas and the slot capacity are not configurable.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Tunable constants for layout, responsive sizing and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width reserved for a space character, before fit scaling.
    pub space_width: f32,
    /// Extra width added to each glyph to avoid edge clipping.
    pub glyph_padding: f32,
    /// Gap between adjacent slots, before fit scaling.
    pub glyph_gap: f32,
    /// Horizontal padding subtracted from the container width.
    pub container_padding: f32,
    /// Viewports at or below this width use `mobile_font_px`.
    pub mobile_breakpoint: f32,
    pub mobile_font_px: f32,
    pub base_font_px: f32,
    /// Viewport width above which the desktop font starts growing.
    pub scale_start_width: f32,
    /// Viewport width step for each `scale_step_gain` increase.
    pub scale_step_width: f32,
    pub scale_step_gain: f32,
    pub max_font_scale: f32,
    /// Sensitivity level (1-5) used until the host sets one.
    pub initial_sensitivity: u8,
    /// FFT size used by the analyser for sample-fed audio inputs.
    pub fft_size: usize,
    pub export: ExportConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            space_width: 40.0,
            glyph_padding: 4.0,
            glyph_gap: 0.676,
            container_padding: 48.0,
            mobile_breakpoint: 768.0,
            mobile_font_px: 120.0,
            base_font_px: 200.0,
            scale_start_width: 1440.0,
            scale_step_width: 400.0,
            scale_step_gain: 0.2,
            max_font_scale: 2.5,
            initial_sensitivity: 3,
            fft_size: 256,
            export: ExportConfig::default(),
        }
    }
}

/// Raster export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Supersampling factor applied to the whole capture.
    pub scale: f32,
    /// Margin around the glyph row, in unscaled pixels.
    pub padding: f32,
    pub background: String,
    pub glyph_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            padding: 40.0,
            background: "#ffffff".to_string(),
            glyph_color: "#404040".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every size is positive and every colour parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("space_width", self.space_width),
            ("base_font_px", self.base_font_px),
            ("mobile_font_px", self.mobile_font_px),
            ("scale_step_width", self.scale_step_width),
            ("max_font_scale", self.max_font_scale),
            ("export.scale", self.export.scale),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let non_negative = [
            ("glyph_padding", self.glyph_padding),
            ("glyph_gap", self.glyph_gap),
            ("container_padding", self.container_padding),
            ("export.padding", self.export.padding),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !(1..=5).contains(&self.initial_sensitivity) {
            return Err(ConfigError::InvalidValue {
                field: "initial_sensitivity",
                value: self.initial_sensitivity as f32,
            });
        }
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(ConfigError::InvalidValue {
                field: "fft_size",
                value: self.fft_size as f32,
            });
        }

        self.export.background_rgb()?;
        self.export.glyph_rgb()?;
        Ok(())
    }
}

impl ExportConfig {
    pub fn background_rgb(&self) -> Result<[u8; 3], ConfigError> {
        parse_hex_color(&self.background)
            .ok_or_else(|| ConfigError::InvalidColor(self.background.clone()))
    }

    pub fn glyph_rgb(&self) -> Result<[u8; 3], ConfigError> {
        parse_hex_color(&self.glyph_color)
            .ok_or_else(|| ConfigError::InvalidColor(self.glyph_color.clone()))
    }
}

/// Parse hex color to RGB bytes (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
