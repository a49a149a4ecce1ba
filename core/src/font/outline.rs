//! Glyph outlines in pixel space.

use std::fmt::Write;

/// One drawing command of a glyph outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// A glyph outline, y-down, with the baseline origin at (0, 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    commands: Vec<PathCommand>,
}

impl GlyphOutline {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Serialize as SVG path data (`d` attribute).
    pub fn to_svg_path_data(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo(x, y) => write!(d, "M{} {}", fmt(x), fmt(y)),
                PathCommand::LineTo(x, y) => write!(d, "L{} {}", fmt(x), fmt(y)),
                PathCommand::QuadTo(x1, y1, x, y) => {
                    write!(d, "Q{} {} {} {}", fmt(x1), fmt(y1), fmt(x), fmt(y))
                }
                PathCommand::CubicTo(x1, y1, x2, y2, x, y) => write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt(x1),
                    fmt(y1),
                    fmt(x2),
                    fmt(y2),
                    fmt(x),
                    fmt(y)
                ),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn fmt(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    let s = format!("{:.2}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
