// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop.rs
//
// Crop operation domain model.

/// Crop region in original-image pixel coordinates.
///
/// Pure domain model: a non-empty rectangle ready for pixel extraction.
/// Built from a clamped [`SelectionRect`](super::SelectionRect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Check that the region lies fully inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x.saturating_add(self.width) <= width && self.y.saturating_add(self.height) <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_is_invalid() {
        assert!(!CropRegion::new(3, 3, 0, 10).is_valid());
        assert!(!CropRegion::new(3, 3, 10, 0).is_valid());
        assert!(CropRegion::new(0, 0, 1, 1).is_valid());
    }

    #[test]
    fn fits_within_checks_far_edges() {
        let region = CropRegion::new(10, 20, 30, 40);
        assert!(region.fits_within(40, 60));
        assert!(!region.fits_within(39, 60));
        assert!(!region.fits_within(40, 59));
    }
}
