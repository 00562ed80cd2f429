// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// Views: the crop tool plus text renderings of each workflow step.

pub mod canvas;
pub mod crop;
pub mod gallery;
pub mod results;
