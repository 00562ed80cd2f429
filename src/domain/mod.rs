// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure domain types: geometry, selection rectangles and crop regions.
// Nothing in here knows about HTTP, rasters or the session.

pub mod crop;
pub mod geometry;
pub mod selection;

pub use crop::CropRegion;
pub use geometry::{DisplayBounds, Point};
pub use selection::SelectionRect;
