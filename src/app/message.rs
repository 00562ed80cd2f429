// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: user actions and backend responses.

use std::path::PathBuf;

use crate::app::document::RasterDocument;
use crate::app::model::{ImageOrigin, ImageSource};
use crate::app::view::crop::PointerEvent;
use crate::backend::{ExportResponse, GalleryResponse, LoadedImage, MatchResponse};
use crate::domain::{DisplayBounds, SelectionRect};
use crate::error::Error;

#[derive(Debug, Clone)]
pub enum AppMessage {
    // Source selection.
    SelectSource(ImageSource),
    ScanLocal {
        folder1: String,
        folder2: String,
    },
    ScanDrive {
        folder1_id: String,
        folder2_id: String,
    },
    AutoLoad,
    Authenticate,
    AuthUrlReceived(Result<Option<String>, Error>),
    ImagesLoaded {
        origin: ImageOrigin,
        result: Result<Vec<String>, Error>,
    },

    // Gallery.
    LoadGallery(u32),
    NextPage,
    PrevPage,
    GalleryLoaded(Result<GalleryResponse, Error>),

    // Crop.
    OpenImage(String),
    ImageLoaded {
        path: String,
        result: Result<LoadedImage, Error>,
    },
    ImageDecoded {
        path: String,
        result: Result<RasterDocument, Error>,
    },
    Pointer(PointerEvent),
    ResizeDisplay(DisplayBounds),
    SetSelection(SelectionRect),
    SelectFace(usize),
    ResetSelection,

    // Reference face.
    SetReferenceFace,
    ReferenceFaceSet(Result<(), Error>),

    // Matching.
    RunMatching,
    MatchingFinished(Result<MatchResponse, Error>),
    FetchResults,
    ResultsFetched(Result<MatchResponse, Error>),

    // Export.
    Export {
        folder_name: String,
    },
    Exported(Result<ExportResponse, Error>),
    ExportZip {
        zip_name: String,
        destination: PathBuf,
    },
    ZipExported(Result<(PathBuf, usize), Error>),
}
