//! Audio normalization port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::error::WavFormatError;
use crate::domain::transcription::{NormalizedAudio, RawAudio};

/// Audio conversion errors
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    #[error("Audio input is empty")]
    EmptyInput,

    #[error("ffmpeg not found at '{0}'. Install ffmpeg or set FFMPEG_PATH")]
    FfmpegNotFound(String),

    #[error("Failed to run ffmpeg: {0}")]
    SpawnFailed(String),

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("Temporary file error: {0}")]
    TempFile(String),

    #[error("Converted audio is not canonical WAV: {0}")]
    InvalidOutput(#[from] WavFormatError),
}

/// Port for converting arbitrary audio into 16 kHz mono PCM16 WAV
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    /// Convert raw audio to the canonical WAV format.
    ///
    /// Implementations must not leave temporary files behind on any path.
    async fn normalize(&self, audio: &RawAudio) -> Result<NormalizedAudio, ConversionError>;
}
