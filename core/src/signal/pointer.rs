//! Pointer signal: last known position over the reactive surface.

use super::{Signal, SignalSource};

/// Normalized pointer position, both axes clamped to 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Position centred on the surface.
    pub const fn neutral() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl Default for PointerPosition {
    fn default() -> Self {
        Self::neutral()
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Bounding rectangle of the reactive surface in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalize a client point. `None` when the rectangle has no area.
    pub fn normalize(&self, client_x: f32, client_y: f32) -> Option<PointerPosition> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(PointerPosition::new(
            (client_x - self.left) / self.width,
            (client_y - self.top) / self.height,
        ))
    }
}

/// Holds the most recently recorded pointer position.
#[derive(Debug, Clone, Default)]
pub struct PointerSignal {
    position: PointerPosition,
}

impl PointerSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> PointerPosition {
        self.position
    }

    /// Record a client-space position. Degenerate rectangles keep the last value.
    pub fn record(&mut self, client_x: f32, client_y: f32, rect: SurfaceRect) -> PointerPosition {
        if let Some(position) = rect.normalize(client_x, client_y) {
            self.position = position;
        }
        self.position
    }

    pub fn set(&mut self, position: PointerPosition) {
        self.position = position;
    }
}

impl SignalSource for PointerSignal {
    fn snapshot(&mut self) -> Signal {
        Signal::Pointer(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamped() {
        let p = PointerPosition::new(-0.3, 1.7);
        assert_eq!(p, PointerPosition { x: 0.0, y: 1.0 });
        assert_eq!(PointerPosition::new(f32::NAN, 0.5).x, 0.0);
    }

    #[test]
    fn test_normalize_against_rect() {
        let rect = SurfaceRect::new(100.0, 50.0, 400.0, 200.0);
        let p = rect.normalize(300.0, 100.0).unwrap();
        assert_eq!(p, PointerPosition::new(0.5, 0.25));
        let outside = rect.normalize(0.0, 1000.0).unwrap();
        assert_eq!(outside, PointerPosition::new(0.0, 1.0));
    }

    #[test]
    fn test_degenerate_rect_keeps_last_value() {
        let mut signal = PointerSignal::new();
        assert_eq!(signal.position(), PointerPosition::neutral());

        let rect = SurfaceRect::new(0.0, 0.0, 100.0, 100.0);
        signal.record(25.0, 75.0, rect);
        let collapsed = SurfaceRect::new(0.0, 0.0, 0.0, 100.0);
        let kept = signal.record(90.0, 10.0, collapsed);
        assert_eq!(kept, PointerPosition::new(0.25, 0.75));
    }

    #[test]
    fn test_snapshot_reads_last_value() {
        let mut signal = PointerSignal::new();
        signal.set(PointerPosition::new(0.1, 0.9));
        assert_eq!(signal.snapshot(), Signal::Pointer(PointerPosition::new(0.1, 0.9)));
        assert_eq!(signal.snapshot(), Signal::Pointer(PointerPosition::new(0.1, 0.9)));
    }
}
