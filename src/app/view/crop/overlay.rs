// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Crop overlay raster: dimmed image with the selection cut out and outlined.

use tiny_skia::{BlendMode, Color, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::selection::CropSelector;
use crate::constant::{BORDER_RGBA, BORDER_WIDTH, OVERLAY_RGBA};
use crate::error::{Error, Result};

/// Allocate a display-sized overlay and draw the current selection into it.
///
/// Returns `None` while the image has no on-screen size.
pub fn render_overlay(selector: &CropSelector) -> Option<Pixmap> {
    let (width, height) = selector.display().pixel_size();
    let mut pixmap = Pixmap::new(width, height)?;
    draw_overlay(&mut pixmap, selector);
    Some(pixmap)
}

/// Redraw `pixmap` from scratch for the selector's visible rectangle.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_overlay(pixmap: &mut Pixmap, selector: &CropSelector) {
    // `fill` overwrites every pixel, so the previous frame is gone too.
    let [r, g, b, a] = OVERLAY_RGBA;
    pixmap.fill(Color::from_rgba8(r, g, b, a));

    let (start, end) = selector.visible_corners();
    let start = selector.to_display(start);
    let end = selector.to_display(end);
    let Some(cutout) = Rect::from_ltrb(
        start.x.min(end.x) as f32,
        start.y.min(end.y) as f32,
        start.x.max(end.x) as f32,
        start.y.max(end.y) as f32,
    ) else {
        return;
    };

    let mut clear = Paint::default();
    clear.blend_mode = BlendMode::Clear;
    clear.anti_alias = false;
    pixmap.fill_rect(cutout, &clear, Transform::identity(), None);

    let [r, g, b, a] = BORDER_RGBA;
    let mut border = Paint::default();
    border.set_color_rgba8(r, g, b, a);
    border.anti_alias = false;
    let path = PathBuilder::from_rect(cutout);
    let stroke = Stroke {
        width: BORDER_WIDTH,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &border, &stroke, Transform::identity(), None);
}

/// PNG bytes of a rendered overlay.
pub fn encode_overlay(pixmap: &Pixmap) -> Result<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| Error::Image(format!("failed to encode overlay: {e}")))
}
