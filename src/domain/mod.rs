//! Domain layer - Core business logic
//!
//! Contains value objects, the response envelope, and domain errors.
//! This layer performs no I/O.

pub mod config;
pub mod error;
pub mod response;
pub mod transcription;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use response::{Response, ResponseBody};
pub use transcription::{
    AudioFormat, AudioSource, NormalizedAudio, RawAudio, TranscriptionOptions,
    TranscriptionRequest, TranscriptionResult,
};
