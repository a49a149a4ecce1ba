//! Responsive font sizing and text-fit scaling.

use crate::config::EngineConfig;

/// Viewport and container geometry for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportContext {
    /// Viewport width in CSS pixels.
    pub width: f32,
    /// Width of the element that hosts the glyph row, including its padding.
    pub container_width: f32,
}

impl ViewportContext {
    pub fn new(width: f32, container_width: f32) -> Self {
        Self {
            width,
            container_width,
        }
    }

    /// Width available to glyphs once the container padding is removed.
    pub fn available_width(&self, config: &EngineConfig) -> f32 {
        self.container_width - config.container_padding
    }
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self::new(1440.0, 1440.0)
    }
}

/// Derived sizing for the current viewport and text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveParams {
    pub font_px: f32,
    pub fit_scale: f32,
}

/// Font pixel size for a viewport width.
///
/// Mobile viewports get a fixed reduced size. Desktop starts at the base size
/// and grows by `scale_step_gain` for every `scale_step_width` pixels beyond
/// `scale_start_width`, capped at `max_font_scale`.
pub fn font_pixel_size(viewport_width: f32, config: &EngineConfig) -> f32 {
    if viewport_width <= config.mobile_breakpoint {
        return config.mobile_font_px;
    }

    if viewport_width > config.scale_start_width {
        let extra = viewport_width - config.scale_start_width;
        let factor = 1.0 + (extra / config.scale_step_width) * config.scale_step_gain;
        (config.base_font_px * factor.min(config.max_font_scale)).round()
    } else {
        config.base_font_px
    }
}

/// Uniform shrink factor keeping `raw_total_width` inside `available_width`.
///
/// Never greater than 1. Degenerate inputs (no text, no room) leave the row
/// unscaled.
pub fn fit_scale(raw_total_width: f32, available_width: f32) -> f32 {
    if available_width <= 0.0 || raw_total_width <= 0.0 {
        return 1.0;
    }
    if raw_total_width > available_width {
        available_width / raw_total_width
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_font_size() {
        let config = EngineConfig::default();
        assert_eq!(font_pixel_size(375.0, &config), 120.0);
        assert_eq!(font_pixel_size(768.0, &config), 120.0);
    }

    #[test]
    fn test_desktop_font_size_steps() {
        let config = EngineConfig::default();
        assert_eq!(font_pixel_size(769.0, &config), 200.0);
        assert_eq!(font_pixel_size(1440.0, &config), 200.0);
        // +20% per 400px
        assert_eq!(font_pixel_size(1840.0, &config), 240.0);
        assert_eq!(font_pixel_size(2240.0, &config), 280.0);
        // 1640px: factor 1.1
        assert_eq!(font_pixel_size(1640.0, &config), 220.0);
    }

    #[test]
    fn test_desktop_font_size_capped() {
        let config = EngineConfig::default();
        assert_eq!(font_pixel_size(4440.0, &config), 500.0);
        assert_eq!(font_pixel_size(10_000.0, &config), 500.0);
    }

    #[test]
    fn test_fit_scale_never_expands() {
        assert_eq!(fit_scale(500.0, 1000.0), 1.0);
        assert_eq!(fit_scale(1000.0, 1000.0), 1.0);
        assert!((fit_scale(2000.0, 1000.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale_degenerate_inputs() {
        assert_eq!(fit_scale(0.0, 1000.0), 1.0);
        assert_eq!(fit_scale(500.0, 0.0), 1.0);
        assert_eq!(fit_scale(500.0, -48.0), 1.0);
    }

    #[test]
    fn test_available_width_subtracts_padding() {
        let config = EngineConfig::default();
        let viewport = ViewportContext::new(1440.0, 1000.0);
        assert_eq!(viewport.available_width(&config), 952.0);
    }
}
