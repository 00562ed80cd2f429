// SPDX-License-Identifier: GPL-3.0-or-later
// src/backend/client.rs
//
// Typed JSON-over-HTTP client for the face-matching backend.

use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AuthResponse, DriveFoldersRequest, ErrorBody, ExportRequest, ExportResponse, FaceRequest,
    GalleryRequest, GalleryResponse, ImagesResponse, LoadImageRequest, LoadedImage, MatchRequest,
    MatchResponse, ScanRequest, ZipExportRequest,
};
use crate::error::{Error, Result};

/// Client for the backend endpoints.
///
/// No retries, no timeouts beyond reqwest's defaults, no deduplication:
/// every call is one request and one response.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::Transport(format!("invalid backend URL {base_url}: {e}")))?;
        // Url::join drops the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of an endpoint path such as `/api/gallery`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Transport(format!("invalid endpoint {path}: {e}")))
    }

    /// `GET /api/image?path=...` URL for a result image.
    ///
    /// Windows separators are normalized to `/` before encoding.
    pub fn image_url(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint("/api/image")?;
        url.query_pairs_mut()
            .append_pair("path", &path.replace('\\', "/"));
        Ok(url)
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    pub async fn scan_images(&self, request: &ScanRequest) -> Result<Vec<String>> {
        let response: ImagesResponse = self.post_json("/api/images/scan", request).await?;
        Ok(response.images)
    }

    pub async fn drive_folders(&self, request: &DriveFoldersRequest) -> Result<Vec<String>> {
        let response: ImagesResponse = self.post_json("/api/drive/folders", request).await?;
        Ok(response.images)
    }

    pub async fn auth_url(&self) -> Result<Option<String>> {
        let response: AuthResponse = self.get_json("/auth").await?;
        Ok(response.auth_url)
    }

    pub async fn gallery(&self, request: &GalleryRequest) -> Result<GalleryResponse> {
        self.post_json("/api/gallery", request).await
    }

    pub async fn load_image(&self, request: &LoadImageRequest) -> Result<LoadedImage> {
        self.post_json("/api/image/load", request).await
    }

    pub async fn set_face(&self, request: &FaceRequest) -> Result<()> {
        let _: serde_json::Value = self.post_json("/api/face/set", request).await?;
        Ok(())
    }

    pub async fn run_matching(&self, request: &MatchRequest) -> Result<MatchResponse> {
        self.post_json("/api/match/run", request).await
    }

    pub async fn results(&self) -> Result<MatchResponse> {
        self.get_json("/api/results").await
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<ExportResponse> {
        self.post_json("/api/export", request).await
    }

    /// Returns the raw archive bytes.
    pub async fn export_zip(&self, request: &ZipExportRequest) -> Result<Vec<u8>> {
        let url = self.endpoint("/api/export/zip")?;
        log::debug!("POST {url}");
        let response = self.http.post(url).json(request).send().await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // -------------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------------

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        log::debug!("POST {url}");
        let response = self.http.post(url).json(body).send().await?;
        read_json(response).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let error = error_from_body(status, &body);
    log::warn!("backend answered {status}: {error}");
    Err(error)
}

/// Map a non-success response to an [`Error`], using the JSON `error`
/// (or `message`) field when present.
pub fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    if status == StatusCode::UNAUTHORIZED {
        Error::Unauthorized(message)
    } else {
        Error::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_onto_base() {
        let client = BackendClient::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            client.endpoint("/api/gallery").unwrap().as_str(),
            "http://127.0.0.1:5000/api/gallery"
        );
    }

    #[test]
    fn endpoints_keep_base_path_prefix() {
        let client = BackendClient::new("https://example.org/faces").unwrap();
        assert_eq!(
            client.endpoint("/api/match/run").unwrap().as_str(),
            "https://example.org/faces/api/match/run"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(Error::Transport(_))
        ));
    }

    #[test]
    fn image_url_normalizes_and_encodes_path() {
        let client = BackendClient::new("http://localhost:5000/").unwrap();
        let url = client.image_url(r"C:\Event Photos\a&b.jpg").unwrap();
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "path");
        assert_eq!(value, "C:/Event Photos/a&b.jpg");
        assert!(!url.query().unwrap().contains(' '));
        assert_eq!(url.path(), "/api/image");
    }

    #[test]
    fn error_body_message_is_used() {
        let err = error_from_body(StatusCode::BAD_REQUEST, br#"{"error": "No reference face set"}"#);
        assert_eq!(
            err,
            Error::Status {
                status: 400,
                message: "No reference face set".into()
            }
        );
        assert_eq!(err.to_string(), "No reference face set");
    }

    #[test]
    fn unauthorized_is_its_own_kind() {
        let err = error_from_body(
            StatusCode::UNAUTHORIZED,
            br#"{"error": "Authentication required"}"#,
        );
        assert!(err.is_unauthorized());
    }

    #[test]
    fn non_json_error_falls_back_to_reason() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(err.to_string(), "Internal Server Error");
    }
}
