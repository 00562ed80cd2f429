// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/canvas.rs
//
// Render the crop canvas state as text.

use std::fmt::Write;

use crate::app::model::CropSession;
use crate::app::view::crop::DragState;

/// Describe the opened image, the selection and the preview.
pub fn view(crop: &CropSession) -> String {
    let mut out = String::new();
    let (nw, nh) = crop.selector.natural_size();
    let (dw, dh) = crop.selector.display().pixel_size();
    let rect = crop.selector.selection();

    let state = if crop.is_loaded() { "" } else { " (loading)" };
    let _ = writeln!(out, "Image:     {}{state}", crop.path);
    let _ = writeln!(out, "Size:      {nw}x{nh} (shown at {dw}x{dh})");
    let _ = writeln!(
        out,
        "Selection: ({}, {}) - ({}, {})  {}x{}",
        rect.x1,
        rect.y1,
        rect.x2,
        rect.y2,
        rect.width(),
        rect.height()
    );

    if let DragState::Dragging { anchor, cursor } = crop.selector.drag() {
        let _ = writeln!(
            out,
            "Dragging:  ({:.0}, {:.0}) -> ({:.0}, {:.0})",
            anchor.x, anchor.y, cursor.x, cursor.y
        );
    }

    match crop.preview() {
        Some(preview) => {
            let (pw, ph) = preview.dimensions();
            let _ = writeln!(out, "Preview:   {pw}x{ph}");
        }
        None if crop.is_preview_pending() => {
            let _ = writeln!(out, "Preview:   waiting for image");
        }
        None => {
            let _ = writeln!(out, "Preview:   none");
        }
    }

    if let Some(overlay) = crop.overlay() {
        let _ = writeln!(
            out,
            "Overlay:   {}x{}, drawn {} times",
            overlay.width(),
            overlay.height(),
            crop.overlay_frames()
        );
    }

    for face in &crop.faces {
        let [x1, y1, x2, y2] = face.bbox;
        let chosen = if crop.face_index() == Some(face.index) { "  (selected)" } else { "" };
        let _ = writeln!(
            out,
            "Face {}:    ({x1}, {y1}) - ({x2}, {y2})  score {:.2}{chosen}",
            face.index + 1,
            face.score
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::document::{PixelCopy, RasterDocument};
    use crate::backend::DetectedFace;
    use crate::domain::DisplayBounds;
    use image::{DynamicImage, RgbaImage};

    #[test]
    fn describes_loading_session() {
        let mut crop = CropSession::new(
            "/event/1.jpg".into(),
            1000,
            800,
            DisplayBounds::sized(500.0, 400.0),
            Vec::new(),
        );
        crop.request_preview(&PixelCopy);
        let text = view(&crop);
        assert!(text.contains("1000x800 (shown at 500x400)"));
        assert!(text.contains("(250, 200) - (750, 600)  500x400"));
        assert!(text.contains("/event/1.jpg (loading)"));
        assert!(text.contains("waiting for image"));
        assert!(!text.contains("Overlay:"));
    }

    #[test]
    fn marks_the_selected_face() {
        let face = |index, bbox| DetectedFace {
            index,
            bbox,
            score: 0.8,
            thumbnail: None,
        };
        let mut crop = CropSession::new(
            "/event/2.jpg".into(),
            200,
            100,
            DisplayBounds::sized(200.0, 100.0),
            vec![face(0, [0, 0, 20, 20]), face(1, [40, 10, 90, 60])],
        );
        let document = RasterDocument::new(DynamicImage::ImageRgba8(RgbaImage::new(200, 100)));
        crop.finish_loading(document, &PixelCopy);
        assert!(crop.select_face(1, &PixelCopy));

        let text = view(&crop);
        assert!(!text.contains("(loading)"));
        assert!(text.contains("Preview:   50x50"));
        assert!(text.contains("Overlay:   200x100"));
        assert!(text.contains("Face 2:    (40, 10) - (90, 60)  score 0.80  (selected)"));
        assert!(text.contains("Face 1:    (0, 0) - (20, 20)  score 0.80\n"));
    }
}
