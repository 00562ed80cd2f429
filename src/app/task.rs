// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/task.rs
//
// Side effects requested by `update`, executed by the runtime.

use std::path::PathBuf;

use crate::app::model::ImageOrigin;
use crate::backend::{
    DriveFoldersRequest, ExportRequest, FaceRequest, GalleryRequest, LoadImageRequest,
    MatchRequest, ScanRequest, ZipExportRequest,
};

/// One backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ScanLocal(ScanRequest),
    DriveFolders {
        origin: ImageOrigin,
        request: DriveFoldersRequest,
    },
    AuthUrl,
    Gallery(GalleryRequest),
    LoadImage(LoadImageRequest),
    SetFace(FaceRequest),
    RunMatching(MatchRequest),
    FetchResults,
    Export(ExportRequest),
    ExportZip {
        request: ZipExportRequest,
        destination: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Task {
    #[default]
    None,
    Request(Request),
    /// Decode the data URL returned by `/api/image/load`.
    DecodeImage { path: String, data_url: String },
    /// Open a URL in the user's browser.
    OpenBrowser(String),
}

impl Task {
    pub fn request(request: Request) -> Self {
        Self::Request(request)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
