// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application, persisted as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constant::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_BACKEND_URL, DEFAULT_MAX_DISPLAY_HEIGHT,
    DEFAULT_MAX_DISPLAY_WIDTH, DEFAULT_SIMILARITY_HIGH, DEFAULT_SIMILARITY_MEDIUM,
};

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the face-matching backend.
    pub backend_url: String,
    /// Optional default event photo directory for local scans.
    pub default_event_dir: Option<PathBuf>,
    /// Maximum rendered width of the crop image.
    pub max_display_width: u32,
    /// Maximum rendered height of the crop image.
    pub max_display_height: u32,
    /// Similarity at or above which a result counts as "high".
    pub similarity_high: f64,
    /// Similarity at or above which a result counts as "medium".
    pub similarity_medium: f64,
    /// Launch the system browser for Drive authentication.
    pub open_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            default_event_dir: dirs::picture_dir(),
            max_display_width: DEFAULT_MAX_DISPLAY_WIDTH,
            max_display_height: DEFAULT_MAX_DISPLAY_HEIGHT,
            similarity_high: DEFAULT_SIMILARITY_HIGH,
            similarity_medium: DEFAULT_SIMILARITY_MEDIUM,
            open_browser: true,
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/facematch/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read a config file.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// when the file is missing or broken.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e:#}; using defaults");
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("facematch-config-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{"backend_url": "http://faces.local:8080"}"#).unwrap();
        assert_eq!(config.backend_url, "http://faces.local:8080");
        assert_eq!(config.max_display_width, DEFAULT_MAX_DISPLAY_WIDTH);
        assert_eq!(config.similarity_high, DEFAULT_SIMILARITY_HIGH);
        assert!(config.open_browser);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_config_path("missing");
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let path = temp_config_path("broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn save_then_load() {
        let path = temp_config_path("saved");
        let config = AppConfig {
            backend_url: "http://10.0.0.2:5000".into(),
            open_browser: false,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(Some(&path)), config);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
