// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// The single entry point that turns messages into state changes and tasks.

use crate::app::message::AppMessage;
use crate::app::model::{
    CropSession, ImageOrigin, ImageSource, MatchingProgress, Session, StatusLine, WorkflowStep,
};
use crate::app::task::{Request, Task};
use crate::backend::{
    DriveFoldersRequest, ExportRequest, FaceRequest, GalleryRequest, LoadImageRequest,
    MatchRequest, ScanRequest, ZipExportRequest,
};
use crate::error::Error;

pub fn update(session: &mut Session, message: AppMessage) -> Task {
    match message {
        // =====================================================================
        // Source selection
        // =====================================================================
        AppMessage::SelectSource(source) => {
            session.source = Some(source);
            Task::None
        }

        AppMessage::ScanLocal { folder1, folder2 } => {
            let folder2 = folder2.trim().to_string();
            if folder2.is_empty() {
                return missing(
                    session,
                    Error::MissingInput("Please provide at least the Event Photos Folder"),
                );
            }
            session.source = Some(ImageSource::Local);
            Task::request(Request::ScanLocal(ScanRequest {
                folder1: folder1.trim().to_string(),
                folder2,
            }))
        }

        AppMessage::ScanDrive {
            folder1_id,
            folder2_id,
        } => {
            let folder2_id = folder2_id.trim().to_string();
            if folder2_id.is_empty() {
                return missing(
                    session,
                    Error::MissingInput("Please provide at least the Event Photos Folder ID"),
                );
            }
            session.source = Some(ImageSource::Drive);
            Task::request(Request::DriveFolders {
                origin: ImageOrigin::Drive,
                request: DriveFoldersRequest::Folders {
                    folder1_id: folder1_id.trim().to_string(),
                    folder2_id,
                },
            })
        }

        AppMessage::AutoLoad => {
            session.source = Some(ImageSource::Drive);
            Task::request(Request::DriveFolders {
                origin: ImageOrigin::AutoLoad,
                request: DriveFoldersRequest::auto_load(),
            })
        }

        AppMessage::Authenticate => Task::request(Request::AuthUrl),

        AppMessage::AuthUrlReceived(result) => match result {
            Ok(Some(url)) => Task::OpenBrowser(url),
            Ok(None) => {
                session.auth_status = Some(StatusLine::failure("Error initiating authentication"));
                Task::None
            }
            Err(e) => {
                log::error!("auth: {e}");
                session.auth_status = Some(StatusLine::failure(format!("Error: {e}")));
                Task::None
            }
        },

        AppMessage::ImagesLoaded { origin, result } => match result {
            Ok(images) => {
                log::info!("{} images from {origin:?}", images.len());
                session.images = images;
                session.fatal = None;
                if origin == ImageOrigin::Drive {
                    session.auth_status = Some(StatusLine::success("Images loaded successfully!"));
                }
                session.show_step(WorkflowStep::Gallery);
                load_gallery(session, 1)
            }
            Err(e) => {
                match origin {
                    ImageOrigin::Local => report(session, "Error scanning folders", &e),
                    ImageOrigin::Drive if e.is_unauthorized() => {
                        session.auth_status =
                            Some(StatusLine::failure("Please authenticate first"));
                    }
                    ImageOrigin::Drive => report(session, "Error loading from Drive", &e),
                    ImageOrigin::AutoLoad => {
                        report(session, "Error loading images", &e);
                        session.fatal = Some(e.to_string());
                    }
                }
                Task::None
            }
        },

        // =====================================================================
        // Gallery
        // =====================================================================
        AppMessage::LoadGallery(page) => load_gallery(session, page),

        AppMessage::NextPage => match session.gallery.next_page() {
            Some(page) => load_gallery(session, page),
            None => Task::None,
        },

        AppMessage::PrevPage => match session.gallery.prev_page() {
            Some(page) => load_gallery(session, page),
            None => Task::None,
        },

        AppMessage::GalleryLoaded(result) => {
            match result {
                Ok(response) => {
                    session.gallery.page = response.page;
                    session.gallery.total_pages = response.total_pages.max(1);
                    session.gallery.thumbnails = response.thumbnails;
                }
                Err(e) => report(session, "Error loading gallery", &e),
            }
            Task::None
        }

        // =====================================================================
        // Crop
        // =====================================================================
        AppMessage::OpenImage(path) => {
            session.current_image = Some(path.clone());
            Task::request(Request::LoadImage(LoadImageRequest { path }))
        }

        AppMessage::ImageLoaded { path, result } => {
            if session.current_image.as_deref() != Some(path.as_str()) {
                log::debug!("dropping stale image load for {path}");
                return Task::None;
            }
            match result {
                Ok(loaded) => {
                    let display = session.fit_display(loaded.width, loaded.height);
                    let mut crop = CropSession::new(
                        path.clone(),
                        loaded.width,
                        loaded.height,
                        display,
                        loaded.faces,
                    );
                    crop.request_preview(session.renderer.as_ref());
                    session.crop = Some(crop);
                    Task::DecodeImage {
                        path,
                        data_url: loaded.image,
                    }
                }
                Err(e) => {
                    report(session, "Error loading image", &e);
                    Task::None
                }
            }
        }

        AppMessage::ImageDecoded { path, result } => {
            let renderer = session.renderer.as_ref();
            let Some(crop) = session.crop.as_mut().filter(|crop| crop.path == path) else {
                log::debug!("dropping stale decode for {path}");
                return Task::None;
            };
            match result {
                Ok(document) => {
                    crop.finish_loading(document, renderer);
                    session.show_step(WorkflowStep::Crop);
                }
                Err(e) => report(session, "Error loading image", &e),
            }
            Task::None
        }

        AppMessage::Pointer(event) => {
            let renderer = session.renderer.as_ref();
            if let Some(crop) = session.crop.as_mut() {
                crop.pointer(event, renderer);
            }
            Task::None
        }

        AppMessage::ResizeDisplay(display) => {
            if let Some(crop) = session.crop.as_mut() {
                crop.resize(display);
            }
            Task::None
        }

        AppMessage::SetSelection(rect) => {
            let renderer = session.renderer.as_ref();
            if let Some(crop) = session.crop.as_mut() {
                crop.set_selection(rect, renderer);
            }
            Task::None
        }

        AppMessage::SelectFace(index) => {
            let renderer = session.renderer.as_ref();
            let Some(crop) = session.crop.as_mut() else {
                session.alert("No image selected");
                return Task::None;
            };
            if !crop.select_face(index, renderer) {
                let found = crop.faces.len();
                session.alert(format!(
                    "Invalid face index: {index}. Found {found} faces."
                ));
            }
            Task::None
        }

        AppMessage::ResetSelection => {
            let renderer = session.renderer.as_ref();
            if let Some(crop) = session.crop.as_mut() {
                crop.reset(renderer);
            }
            Task::None
        }

        // =====================================================================
        // Reference face
        // =====================================================================
        AppMessage::SetReferenceFace => {
            let Some(path) = session.current_image.clone() else {
                return missing(session, Error::MissingInput("No image selected"));
            };
            let Some(crop) = session.crop.as_ref().filter(|crop| crop.path == path) else {
                return missing(session, Error::MissingInput("No image selected"));
            };
            Task::request(Request::SetFace(FaceRequest {
                path,
                rect: crop.selector.selection(),
                face_index: crop.face_index(),
            }))
        }

        AppMessage::ReferenceFaceSet(result) => {
            match result {
                Ok(()) => {
                    session.info("Reference face set successfully!");
                    session.show_step(WorkflowStep::Match);
                }
                Err(e) => report(session, "Error setting reference face", &e),
            }
            Task::None
        }

        // =====================================================================
        // Matching
        // =====================================================================
        AppMessage::RunMatching => {
            session.matching = MatchingProgress::Running;
            Task::request(Request::RunMatching(MatchRequest {
                images: session.images.clone(),
            }))
        }

        AppMessage::MatchingFinished(result) => {
            match result {
                Ok(response) => {
                    log::info!("{} of {} images matched", response.matched, response.total);
                    session.matching = MatchingProgress::Complete;
                    session.results = Some(response);
                    session.show_step(WorkflowStep::Results);
                }
                Err(e) => {
                    session.matching = MatchingProgress::Hidden;
                    report(session, "Error running matching", &e);
                }
            }
            Task::None
        }

        AppMessage::FetchResults => Task::request(Request::FetchResults),

        AppMessage::ResultsFetched(result) => {
            match result {
                Ok(response) => {
                    session.matching = MatchingProgress::Complete;
                    session.results = Some(response);
                    session.show_step(WorkflowStep::Results);
                }
                Err(e) => report(session, "Error fetching results", &e),
            }
            Task::None
        }

        // =====================================================================
        // Export
        // =====================================================================
        AppMessage::Export { folder_name } => {
            let folder_name = folder_name.trim().to_string();
            if folder_name.is_empty() {
                return missing(session, Error::MissingInput("Please enter a folder name"));
            }
            session.export_status = Some(StatusLine::success("Exporting..."));
            let results = session
                .results
                .as_ref()
                .map(|r| r.results.clone())
                .unwrap_or_default();
            Task::request(Request::Export(ExportRequest {
                folder_name,
                results,
            }))
        }

        AppMessage::Exported(result) => {
            match result {
                Ok(response) => {
                    session.export_status = Some(StatusLine::success(format!(
                        "Exported {} images to {}",
                        response.exported, response.folder
                    )));
                    session.show_step(WorkflowStep::Exported);
                }
                Err(e) => {
                    log::error!("export: {e}");
                    session.export_status = Some(StatusLine::failure(format!("Error: {e}")));
                }
            }
            Task::None
        }

        AppMessage::ExportZip {
            zip_name,
            destination,
        } => {
            let zip_name = zip_name.trim().to_string();
            if zip_name.is_empty() {
                return missing(session, Error::MissingInput("Please enter a file name"));
            }
            session.export_status = Some(StatusLine::success("Exporting..."));
            Task::request(Request::ExportZip {
                request: ZipExportRequest { zip_name },
                destination,
            })
        }

        AppMessage::ZipExported(result) => {
            match result {
                Ok((path, bytes)) => {
                    session.export_status = Some(StatusLine::success(format!(
                        "Saved {bytes} bytes to {}",
                        path.display()
                    )));
                    session.show_step(WorkflowStep::Exported);
                }
                Err(e) => {
                    log::error!("zip export: {e}");
                    session.export_status = Some(StatusLine::failure(format!("Error: {e}")));
                }
            }
            Task::None
        }
    }
}

fn load_gallery(session: &Session, page: u32) -> Task {
    Task::request(Request::Gallery(GalleryRequest {
        images: session.images.clone(),
        page,
    }))
}

fn missing(session: &mut Session, error: Error) -> Task {
    session.alert(error.to_string());
    Task::None
}

fn report(session: &mut Session, context: &str, error: &Error) {
    log::error!("{context}: {error}");
    session.alert(format!("{context}: {error}"));
}
