// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/preview.rs
//
// Live preview of the selected region, cut from the source raster.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::app::document::{RasterDocument, RegionRenderer};
use crate::constant::PREVIEW_MIME;
use crate::domain::{CropRegion, SelectionRect};
use crate::error::{Error, Result};

/// A rendered crop preview.
#[derive(Debug, Clone, PartialEq)]
pub struct CropPreview {
    /// The clamped region the preview was cut from.
    pub region: CropRegion,
    pub image: RgbaImage,
    /// `data:image/png;base64,...` for display.
    pub data_url: String,
}

impl CropPreview {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw PNG bytes behind the data URL.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }
}

/// Cut `rect` out of `document`, from scratch.
///
/// Returns `Ok(None)` when the rectangle has no area after clamping to the
/// image bounds; the caller keeps whatever preview it had.
pub fn render_preview(
    document: &RasterDocument,
    rect: SelectionRect,
    renderer: &dyn RegionRenderer,
) -> Result<Option<CropPreview>> {
    let (width, height) = document.dimensions();
    let Some(region) = rect.crop_region(width, height) else {
        log::debug!("skipping preview for empty selection {rect:?}");
        return Ok(None);
    };

    let image = document.render_region(region, renderer)?;
    let png = encode_png(&image)?;
    let data_url = format!("data:{PREVIEW_MIME};base64,{}", STANDARD.encode(png));

    Ok(Some(CropPreview {
        region,
        image,
        data_url,
    }))
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Image(format!("failed to encode preview: {e}")))?;
    Ok(out.into_inner())
}
