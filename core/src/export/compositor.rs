//! Rasterizes a [`RowFrame`] with tiny-skia.

use log::{debug, warn};
use tiny_skia::{Color, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

use super::{export_filename, ExportError, ExportedImage};
use crate::config::ExportConfig;
use crate::font::{GlyphOutline, PathCommand};
use crate::frame::RowFrame;

/// Draws rows onto a padded, supersampled surface.
#[derive(Debug, Clone)]
pub struct Compositor {
    scale: f32,
    padding: f32,
    background: [u8; 3],
    glyph_color: [u8; 3],
}

impl Compositor {
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        Ok(Self {
            scale: config.scale,
            padding: config.padding,
            background: config.background_rgb()?,
            glyph_color: config.glyph_rgb()?,
        })
    }

    /// Output size in pixels for a frame.
    pub fn surface_size(&self, frame: &RowFrame) -> (u32, u32) {
        let width = ((frame.width() + 2.0 * self.padding) * self.scale).ceil();
        let height = ((frame.height() + 2.0 * self.padding) * self.scale).ceil();
        (width.max(1.0) as u32, height.max(1.0) as u32)
    }

    /// Draw the frame. `None` when nothing would be visible.
    pub fn render(&self, frame: &RowFrame) -> Result<Option<Pixmap>, ExportError> {
        if !frame.has_visible_glyphs() {
            return Ok(None);
        }

        let (width, height) = self.surface_size(frame);
        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
        let [r, g, b] = self.background;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));

        let mut paint = Paint::default();
        let [r, g, b] = self.glyph_color;
        paint.set_color_rgba8(r, g, b, 255);
        paint.anti_alias = true;

        let row_height = frame.height();
        let offsets = frame.slot_offsets();
        for (slot, left) in frame.slots.iter().zip(offsets) {
            let Some(glyph) = slot.glyph.as_ref() else {
                continue;
            };
            if slot.is_collapsed() {
                continue;
            }
            let Some(path) = build_path(&glyph.outline) else {
                continue;
            };

            let x = self.padding + left;
            let y = self.padding + frame.alignment.slot_top(row_height, slot.height);
            let (sx, sy) = glyph.view_box.scale_into(slot.width, slot.height);
            let transform = Transform::from_row(
                sx * self.scale,
                0.0,
                0.0,
                sy * self.scale,
                (x - glyph.view_box.min_x * sx) * self.scale,
                (y - glyph.view_box.min_y * sy) * self.scale,
            );

            // The viewport clips whatever falls outside the slot box
            let clip = slot_mask(
                width,
                height,
                x * self.scale,
                y * self.scale,
                slot.width * self.scale,
                slot.height * self.scale,
            );
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, clip.as_ref());
        }

        debug!("Rendered {}x{} export surface", width, height);
        Ok(Some(pixmap))
    }

    /// Render and encode the frame as PNG.
    ///
    /// Returns `Ok(None)` (and logs a warning) when there is nothing to export.
    pub fn export(
        &self,
        frame: &RowFrame,
        text: &str,
        unix_millis: u128,
    ) -> Result<Option<ExportedImage>, ExportError> {
        let Some(pixmap) = self.render(frame)? else {
            warn!("Nothing to export: no visible glyphs");
            return Ok(None);
        };
        let (width, height) = (pixmap.width(), pixmap.height());
        // Opaque background, so premultiplied and straight alpha agree
        let rgba = pixmap.take();
        let filename = export_filename(text, unix_millis);
        ExportedImage::encode(filename, width, height, rgba).map(Some)
    }
}

fn build_path(outline: &GlyphOutline) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(x, y) => pb.move_to(x, y),
            PathCommand::LineTo(x, y) => pb.line_to(x, y),
            PathCommand::QuadTo(x1, y1, x, y) => pb.quad_to(x1, y1, x, y),
            PathCommand::CubicTo(x1, y1, x2, y2, x, y) => pb.cubic_to(x1, y1, x2, y2, x, y),
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}

fn slot_mask(width: u32, height: u32, x: f32, y: f32, w: f32, h: f32) -> Option<Mask> {
    let rect = Rect::from_xywh(x, y, w, h)?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(
        &PathBuilder::from_rect(rect),
        FillRule::Winding,
        false,
        Transform::identity(),
    );
    Some(mask)
}
