// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/runtime.rs
//
// Executes tasks against the backend and feeds responses back into `update`.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::app::document::RasterDocument;
use crate::app::message::AppMessage;
use crate::app::model::{ImageOrigin, NoticeLevel, Session};
use crate::app::task::{Request, Task};
use crate::app::update::update;
use crate::backend::BackendClient;
use crate::error::Error;

/// Drives a [`Session`] with a [`BackendClient`].
///
/// Tasks run one after the other on the current thread; each response is
/// applied as soon as it arrives.
pub struct Runtime {
    client: BackendClient,
    session: Session,
    open_browser: bool,
}

impl Runtime {
    pub fn new(client: BackendClient, session: Session, open_browser: bool) -> Self {
        Self {
            client,
            session,
            open_browser,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Handle `message` and everything it triggers, until the session is idle.
    pub async fn dispatch(&mut self, message: AppMessage) {
        let mut queue = VecDeque::from([message]);
        while let Some(message) = queue.pop_front() {
            let task = update(&mut self.session, message);
            self.flush_notices();
            if task.is_none() {
                continue;
            }
            if let Some(reply) = self.execute(task).await {
                queue.push_back(reply);
            }
        }
        self.flush_notices();
    }

    async fn execute(&self, task: Task) -> Option<AppMessage> {
        match task {
            Task::None => None,
            Task::Request(request) => Some(self.perform(request).await),
            Task::DecodeImage { path, data_url } => {
                let result =
                    tokio::task::spawn_blocking(move || RasterDocument::from_data_url(&data_url))
                        .await
                        .unwrap_or_else(|e| Err(Error::Image(format!("decoder failed: {e}"))));
                Some(AppMessage::ImageDecoded { path, result })
            }
            Task::OpenBrowser(url) => {
                self.open_in_browser(&url);
                None
            }
        }
    }

    async fn perform(&self, request: Request) -> AppMessage {
        let client = &self.client;
        match request {
            Request::ScanLocal(request) => AppMessage::ImagesLoaded {
                origin: ImageOrigin::Local,
                result: client.scan_images(&request).await,
            },
            Request::DriveFolders { origin, request } => AppMessage::ImagesLoaded {
                origin,
                result: client.drive_folders(&request).await,
            },
            Request::AuthUrl => AppMessage::AuthUrlReceived(client.auth_url().await),
            Request::Gallery(request) => AppMessage::GalleryLoaded(client.gallery(&request).await),
            Request::LoadImage(request) => {
                let result = client.load_image(&request).await;
                AppMessage::ImageLoaded {
                    path: request.path,
                    result,
                }
            }
            Request::SetFace(request) => AppMessage::ReferenceFaceSet(client.set_face(&request).await),
            Request::RunMatching(request) => {
                AppMessage::MatchingFinished(client.run_matching(&request).await)
            }
            Request::FetchResults => AppMessage::ResultsFetched(client.results().await),
            Request::Export(request) => AppMessage::Exported(client.export(&request).await),
            Request::ExportZip {
                request,
                destination,
            } => {
                let archive = client.export_zip(&request).await;
                AppMessage::ZipExported(save_archive(archive, destination).await)
            }
        }
    }

    fn open_in_browser(&self, url: &str) {
        if self.open_browser {
            match open::that(url) {
                Ok(()) => {
                    log::info!("opened {url}");
                    return;
                }
                Err(e) => log::warn!("could not open browser: {e}"),
            }
        }
        println!("Open this URL to authenticate: {url}");
    }

    fn flush_notices(&mut self) {
        for notice in self.session.take_notices() {
            match notice.level {
                NoticeLevel::Info => println!("{}", notice.text),
                NoticeLevel::Error => eprintln!("{}", notice.text),
            }
        }
    }
}

/// Write a downloaded archive to `destination`, reporting its size.
async fn save_archive(
    archive: Result<Vec<u8>, Error>,
    destination: PathBuf,
) -> Result<(PathBuf, usize), Error> {
    let bytes = archive?;
    tokio::fs::write(&destination, &bytes).await?;
    log::info!("wrote {} bytes to {}", bytes.len(), destination.display());
    Ok((destination, bytes.len()))
}
