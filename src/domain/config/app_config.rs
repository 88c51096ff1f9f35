//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default transcription model
pub const DEFAULT_MODEL: &str = "whisper-large-v3-turbo";

/// Default ffmpeg executable, resolved through PATH
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub temp_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            model: Some(DEFAULT_MODEL.to_string()),
            ffmpeg_path: Some(DEFAULT_FFMPEG.to_string()),
            temp_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through a lookup function. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            api_key: get("GROQ_API_KEY"),
            base_url: get("GROQ_BASE_URL"),
            model: get("TRANSCRIBE_MODEL"),
            ffmpeg_path: get("FFMPEG_PATH"),
            temp_dir: get("TRANSCRIBE_TEMP_DIR"),
        }
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            base_url: other.base_url.or(self.base_url),
            model: other.model.or(self.model),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
            temp_dir: other.temp_dir.or(self.temp_dir),
        }
    }

    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn ffmpeg_path_or_default(&self) -> PathBuf {
        PathBuf::from(self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG))
    }

    /// Directory for scoped temp files, or the OS temp dir if not set
    pub fn temp_dir_or_default(&self) -> PathBuf {
        self.temp_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }
}
