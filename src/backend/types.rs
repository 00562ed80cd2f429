// SPDX-License-Identifier: GPL-3.0-or-later
// src/backend/types.rs
//
// Request and response bodies of the backend JSON API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::SelectionRect;

// =============================================================================
// Image sources
// =============================================================================

/// `POST /api/images/scan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    /// Reference photos folder (optional, may be empty).
    pub folder1: String,
    /// Event photos folder.
    pub folder2: String,
}

/// `POST /api/drive/folders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DriveFoldersRequest {
    Folders {
        folder1_id: String,
        folder2_id: String,
    },
    AutoLoad {
        use_youtheletes: bool,
        auto_load: bool,
    },
}

impl DriveFoldersRequest {
    pub fn auto_load() -> Self {
        Self::AutoLoad {
            use_youtheletes: true,
            auto_load: true,
        }
    }
}

/// Image list returned by both scan endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<String>,
}

/// `GET /auth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub auth_url: Option<String>,
}

// =============================================================================
// Gallery
// =============================================================================

/// `POST /api/gallery`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryRequest {
    pub images: Vec<String>,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryResponse {
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total: Option<usize>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    /// Position in the full image list (0-based).
    pub index: usize,
    /// Thumbnail as a data URL.
    pub thumbnail: String,
}

// =============================================================================
// Crop / reference face
// =============================================================================

/// `POST /api/image/load`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadImageRequest {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoadedImage {
    /// Image as a data URL.
    pub image: String,
    pub width: u32,
    pub height: u32,
    /// Faces the backend already detected, if it reports them.
    #[serde(default)]
    pub faces: Vec<DetectedFace>,
    #[serde(default)]
    pub face_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedFace {
    pub index: usize,
    /// `[x1, y1, x2, y2]` in the loaded image's pixels.
    pub bbox: [i32; 4],
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// `POST /api/face/set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceRequest {
    pub path: String,
    #[serde(flatten)]
    pub rect: SelectionRect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_index: Option<usize>,
}

// =============================================================================
// Matching / export
// =============================================================================

/// `POST /api/match/run`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRequest {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub image_path: String,
    pub max_similarity: f64,
    pub faces: u32,
    /// The backend reports this as `0`/`1` as often as `false`/`true`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_match: bool,
}

/// Result set of `POST /api/match/run` and `GET /api/results`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    pub matched: usize,
    pub total: usize,
}

/// `POST /api/export`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub folder_name: String,
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportResponse {
    pub exported: usize,
    pub folder: String,
}

/// `POST /api/export/zip`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZipExportRequest {
    pub zip_name: String,
}

/// Error body attached to non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Float(f) => f != 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drive_request_shapes() {
        let folders = DriveFoldersRequest::Folders {
            folder1_id: "ref".into(),
            folder2_id: "event".into(),
        };
        assert_eq!(
            serde_json::to_value(folders).unwrap(),
            json!({"folder1_id": "ref", "folder2_id": "event"})
        );
        assert_eq!(
            serde_json::to_value(DriveFoldersRequest::auto_load()).unwrap(),
            json!({"use_youtheletes": true, "auto_load": true})
        );
    }

    #[test]
    fn face_request_flattens_rect() {
        let req = FaceRequest {
            path: "/photos/a.jpg".into(),
            rect: SelectionRect::new(50, 50, 100, 100),
            face_index: None,
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"path": "/photos/a.jpg", "x1": 50, "y1": 50, "x2": 100, "y2": 100})
        );
    }

    #[test]
    fn match_flag_accepts_ints_and_bools() {
        let body = json!({
            "results": [
                {"image_path": "a.jpg", "max_similarity": 0.61, "faces": 2, "is_match": 1},
                {"image_path": "b.jpg", "max_similarity": 0.1, "faces": 1, "is_match": false},
                {"image_path": "c.jpg", "max_similarity": 0, "faces": 0}
            ],
            "matched": 1,
            "total": 3
        });
        let parsed: MatchResponse = serde_json::from_value(body).unwrap();
        let flags: Vec<bool> = parsed.results.iter().map(|r| r.is_match).collect();
        assert_eq!(flags, vec![true, false, false]);
        assert_eq!(parsed.results[2].max_similarity, 0.0);
    }

    #[test]
    fn loaded_image_without_faces() {
        let body = json!({"image": "data:image/jpeg;base64,AAAA", "width": 640, "height": 480});
        let loaded: LoadedImage = serde_json::from_value(body).unwrap();
        assert_eq!((loaded.width, loaded.height), (640, 480));
        assert!(loaded.faces.is_empty());
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_value(json!({"error": "boom", "message": "other"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("boom"));

        let body: ErrorBody = serde_json::from_value(json!({"message": "only"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("only"));
    }
}
