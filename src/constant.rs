// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Overlay tint outside the selection (RGBA, 50% black).
pub const OVERLAY_RGBA: [u8; 4] = [0, 0, 0, 128];

/// Selection border color (RGBA, #667eea).
pub const BORDER_RGBA: [u8; 4] = [0x66, 0x7e, 0xea, 0xff];

/// Selection border stroke width in display pixels.
pub const BORDER_WIDTH: f32 = 2.0;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default maximum rendered size of the crop image (display pixels).
pub const DEFAULT_MAX_DISPLAY_WIDTH: u32 = 800;
pub const DEFAULT_MAX_DISPLAY_HEIGHT: u32 = 600;

/// Default similarity at or above which a result is shown as "high".
pub const DEFAULT_SIMILARITY_HIGH: f64 = 0.5;

/// Default similarity at or above which a result is shown as "medium".
pub const DEFAULT_SIMILARITY_MEDIUM: f64 = 0.35;

/// Config directory name (below the platform config dir).
pub const CONFIG_DIR: &str = "facematch";

/// Config file name.
pub const CONFIG_FILE: &str = "config.json";

/// MIME type of generated preview data URLs.
pub const PREVIEW_MIME: &str = "image/png";
