//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{NormalizedAudio, TranscriptionOptions, TranscriptionResult};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API response has no 'text' field")]
    MissingText,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Temporary file error: {0}")]
    TempFile(String),
}

/// Port for speech-to-text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe normalized audio.
    ///
    /// # Arguments
    /// * `audio` - Canonical 16 kHz mono PCM16 WAV
    /// * `options` - Upload filename, language and instruction prompt
    ///
    /// # Returns
    /// The service response, with its structured fields passed through unchanged
    async fn transcribe(
        &self,
        audio: &NormalizedAudio,
        options: &TranscriptionOptions,
    ) -> Result<TranscriptionResult, TranscriptionError>;
}
