// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop tool: selection state machine, overlay raster and live preview.

mod overlay;
mod preview;
mod selection;

pub use overlay::{draw_overlay, encode_overlay, render_overlay};
pub use preview::{CropPreview, render_preview};
pub use selection::{CropOutcome, CropSelector, DragState, PointerEvent};
