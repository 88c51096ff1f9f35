//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;

/// transcribe-fn - audio transcription function
#[derive(Parser, Debug)]
#[command(name = "transcribe-fn")]
#[command(version)]
#[command(about = "Audio transcription function: normalizes audio to 16 kHz mono WAV and transcribes it with a Whisper-compatible API")]
#[command(long_about = None)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the function on an event and print the response JSON
    Invoke(InvokeArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `invoke`
#[derive(Args, Debug, Default)]
pub struct InvokeArgs {
    /// Read the event from this file instead of stdin
    #[arg(short = 'e', long, value_name = "FILE", conflicts_with = "events")]
    pub event: Option<PathBuf>,

    /// Process newline-delimited events from this file, one response per line
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(short = 'p', long, conflicts_with = "events")]
    pub pretty: bool,

    /// Transcription API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Transcription model
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Path to the ffmpeg executable
    #[arg(long, value_name = "PATH")]
    pub ffmpeg_path: Option<String>,

    /// Directory for temporary audio files
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<String>,
}

impl InvokeArgs {
    /// Config overrides given on the command line
    pub fn config_overrides(&self) -> AppConfig {
        AppConfig {
            api_key: None, // API key comes from env/file only
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            ffmpeg_path: self.ffmpeg_path.clone(),
            temp_dir: self.temp_dir.clone(),
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Keys accepted by `config set` / `config get`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    BaseUrl,
    Model,
    FfmpegPath,
    TempDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        Self::ApiKey,
        Self::BaseUrl,
        Self::Model,
        Self::FfmpegPath,
        Self::TempDir,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::BaseUrl => "base_url",
            Self::Model => "model",
            Self::FfmpegPath => "ffmpeg_path",
            Self::TempDir => "temp_dir",
        }
    }

    /// Look up a key by its config-file name
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}
