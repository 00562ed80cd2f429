// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/selection.rs
//
// Selection rectangle in original-image pixel coordinates.

use serde::{Deserialize, Serialize};

use super::crop::CropRegion;
use super::geometry::Point;

/// The user-chosen crop region, always in original-pixel space.
///
/// Serializes as the flat `x1, y1, x2, y2` object the backend expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The centered 50% box used before any drag.
    #[allow(clippy::cast_possible_truncation)]
    pub fn centered(width: u32, height: u32) -> Self {
        let (w, h) = (i64::from(width), i64::from(height));
        Self {
            x1: (w / 4) as i32,
            y1: (h / 4) as i32,
            x2: (w * 3 / 4) as i32,
            y2: (h * 3 / 4) as i32,
        }
    }

    /// Normalize an unordered anchor/cursor pair (min/max, floored).
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x).floor() as i32,
            y1: a.y.min(b.y).floor() as i32,
            x2: a.x.max(b.x).floor() as i32,
            y2: a.y.max(b.y).floor() as i32,
        }
    }

    /// Build from a backend `[x1, y1, x2, y2]` bounding box.
    pub fn from_bbox(bbox: [i32; 4]) -> Self {
        let [x1, y1, x2, y2] = bbox;
        Self::from_corners(
            Point::new(f64::from(x1), f64::from(y1)),
            Point::new(f64::from(x2), f64::from(y2)),
        )
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Clip to `[0, width] x [0, height]`.
    ///
    /// Only the outer edges are pulled in; a rectangle lying entirely
    /// outside the image comes back with non-positive extent.
    pub fn clamp(&self, width: u32, height: u32) -> Self {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(max_x),
            y2: self.y2.min(max_y),
        }
    }

    /// The clamped rectangle as a pixel region, or `None` when it has no area.
    #[allow(clippy::cast_sign_loss)]
    pub fn crop_region(&self, width: u32, height: u32) -> Option<CropRegion> {
        let clamped = self.clamp(width, height);
        if clamped.x2 <= clamped.x1 || clamped.y2 <= clamped.y1 {
            return None;
        }
        Some(CropRegion::new(
            clamped.x1 as u32,
            clamped.y1 as u32,
            clamped.width() as u32,
            clamped.height() as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_for_1000_by_800() {
        assert_eq!(
            SelectionRect::centered(1000, 800),
            SelectionRect::new(250, 200, 750, 600)
        );
    }

    #[test]
    fn centered_box_floors_odd_sizes() {
        assert_eq!(
            SelectionRect::centered(7, 5),
            SelectionRect::new(1, 1, 5, 3)
        );
    }

    #[test]
    fn corners_are_normalized_in_any_order() {
        let a = Point::new(100.0, 20.0);
        let b = Point::new(50.0, 80.0);
        let expected = SelectionRect::new(50, 20, 100, 80);
        assert_eq!(SelectionRect::from_corners(a, b), expected);
        assert_eq!(SelectionRect::from_corners(b, a), expected);
    }

    #[test]
    fn corners_are_floored() {
        let rect = SelectionRect::from_corners(Point::new(10.9, 3.2), Point::new(20.7, 9.99));
        assert_eq!(rect, SelectionRect::new(10, 3, 20, 9));
    }

    #[test]
    fn clamp_clips_to_image_bounds() {
        let rect = SelectionRect::new(-20, -5, 1200, 900);
        assert_eq!(rect.clamp(1000, 800), SelectionRect::new(0, 0, 1000, 800));
    }

    #[test]
    fn crop_region_of_clipped_rect() {
        let rect = SelectionRect::new(900, 700, 1100, 850);
        assert_eq!(
            rect.crop_region(1000, 800),
            Some(CropRegion::new(900, 700, 100, 100))
        );
    }

    #[test]
    fn degenerate_rects_have_no_region() {
        assert_eq!(SelectionRect::new(10, 10, 10, 50).crop_region(100, 100), None);
        assert_eq!(SelectionRect::new(10, 60, 40, 50).crop_region(100, 100), None);
        // Entirely right of the image.
        assert_eq!(SelectionRect::new(150, 10, 180, 50).crop_region(100, 100), None);
    }

    #[test]
    fn serializes_as_flat_corner_object() {
        let json = serde_json::to_value(SelectionRect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"x1": 1, "y1": 2, "x2": 3, "y2": 4}));
    }
}
