//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, the Groq API, etc.

pub mod audio;
pub mod config;
pub mod fetch;
pub mod temp_file;
pub mod transcription;

// Re-export adapters
pub use audio::FfmpegNormalizer;
pub use config::XdgConfigStore;
pub use fetch::HttpAudioFetcher;
pub use temp_file::ScopedTempFile;
pub use transcription::GroqTranscriber;
