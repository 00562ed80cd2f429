// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry.rs
//
// Points and on-screen image geometry.

/// A point in any of the coordinate spaces (viewport, display-local or
/// original-pixel). The owner decides which one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where and how large an image is rendered on screen.
///
/// `left`/`top` is the element's top-left corner in viewport coordinates,
/// `width`/`height` its rendered size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds at the viewport origin with the given rendered size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Fit a natural-size image into a `max_width` x `max_height` box,
    /// keeping the aspect ratio and never upscaling.
    pub fn fit(natural_width: u32, natural_height: u32, max_width: u32, max_height: u32) -> Self {
        if natural_width == 0 || natural_height == 0 {
            return Self::default();
        }

        let scale_x = f64::from(max_width) / f64::from(natural_width);
        let scale_y = f64::from(max_height) / f64::from(natural_height);
        let scale = scale_x.min(scale_y).min(1.0);

        Self::sized(
            (f64::from(natural_width) * scale).round(),
            (f64::from(natural_height) * scale).round(),
        )
    }

    /// Translate a viewport point into display-local coordinates.
    pub fn to_local(&self, viewport: Point) -> Point {
        Point::new(viewport.x - self.left, viewport.y - self.top)
    }

    /// Ratio of natural to rendered size on each axis.
    ///
    /// A zero rendered dimension maps 1:1 on that axis.
    pub fn scale_for(&self, natural_width: u32, natural_height: u32) -> (f64, f64) {
        let axis = |natural: u32, shown: f64| {
            if shown > 0.0 {
                f64::from(natural) / shown
            } else {
                1.0
            }
        };
        (
            axis(natural_width, self.width),
            axis(natural_height, self.height),
        )
    }

    /// Rendered size rounded to whole pixels, for allocating rasters.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}
