// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error taxonomy shared by the backend client and the session.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while driving the workflow.
///
/// Every variant ends up as a user-facing notice; none is fatal.
/// Kept `Clone` so failures can travel inside messages.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The backend requires Google Drive authentication.
    #[error("{0}")]
    Unauthorized(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response from backend: {0}")]
    Decode(String),

    /// Image bytes or data URL could not be decoded.
    #[error("could not decode image: {0}")]
    Image(String),

    /// A required field was left empty.
    #[error("{0}")]
    MissingInput(&'static str),

    /// Local file output failed.
    #[error("{0}")]
    Io(String),
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
