// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/mod.rs
//
// Source raster of the crop tool and the region-rendering capability.

pub mod raster;

use image::{DynamicImage, GenericImageView, RgbaImage, imageops};

use crate::domain::CropRegion;
use crate::error::{Error, Result};

pub use raster::RasterDocument;

/// Render a region of a source raster into a new target raster.
///
/// The crop preview only ever goes through this trait, so a headless or
/// recording backend can stand in for the pixel copy.
pub trait RegionRenderer {
    /// Copy `region` of `source` at 1:1 scale into a raster sized to the region.
    fn render_region(&self, source: &DynamicImage, region: CropRegion) -> Result<RgbaImage>;
}

/// Default renderer: plain pixel copy through `image`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelCopy;

impl RegionRenderer for PixelCopy {
    fn render_region(&self, source: &DynamicImage, region: CropRegion) -> Result<RgbaImage> {
        let (width, height) = source.dimensions();
        if !region.is_valid() || !region.fits_within(width, height) {
            return Err(Error::Image(format!(
                "region {:?} outside {width}x{height} source",
                region.as_tuple()
            )));
        }

        let (x, y, w, h) = region.as_tuple();
        Ok(imageops::crop_imm(source, x, y, w, h).to_image())
    }
}
