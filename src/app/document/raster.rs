// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/raster.rs

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage};

use super::RegionRenderer;
use crate::domain::CropRegion;
use crate::error::{Error, Result};

/// The decoded source image of the crop tool (PNG, JPEG, WebP, ...).
#[derive(Clone)]
pub struct RasterDocument {
    /// The decoded image document.
    document: DynamicImage,
}

impl fmt::Debug for RasterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "RasterDocument({w}x{h})")
    }
}

impl RasterDocument {
    pub fn new(document: DynamicImage) -> Self {
        Self { document }
    }

    /// Load a raster document from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let document = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        Ok(Self::new(document))
    }

    /// Decode encoded image bytes, guessing the format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(image::load_from_memory(bytes)?))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL as served by the backend.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let payload = data_url_payload(url)?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::Image(format!("bad base64 payload: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.document.dimensions()
    }

    /// Extract `region` at native resolution.
    pub fn render_region(
        &self,
        region: CropRegion,
        renderer: &dyn RegionRenderer,
    ) -> Result<RgbaImage> {
        renderer.render_region(&self.document, region)
    }
}

fn data_url_payload(url: &str) -> Result<&str> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Image("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Image("data URL without payload".into()))?;
    if !header.ends_with(";base64") {
        return Err(Error::Image(format!("unsupported data URL encoding: {header}")));
    }
    Ok(payload)
}
