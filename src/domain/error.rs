//! Domain error types

use thiserror::Error;

/// Error when an incoming event cannot be turned into a transcription request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing required parameter: either audio_data or audio_url")]
    MissingAudioSource,

    #[error("Request must be a JSON object")]
    NotAnObject,

    #[error("Invalid parameter '{field}': expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid base64 in audio_data: {0}")]
    InvalidBase64(String),

    #[error("Audio payload is empty")]
    EmptyAudio,
}

/// Error when a byte buffer is not a canonical 16 kHz mono PCM16 WAV
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WavFormatError {
    #[error("Not a readable WAV stream: {0}")]
    Unreadable(String),

    #[error("Unexpected WAV {field}: expected {expected}, got {actual}")]
    Mismatch {
        field: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("WAV samples are not integer PCM")]
    NotIntegerPcm,

    #[error("WAV stream contains no audio")]
    NoSamples,
}

/// Error when the transcription service response has no usable text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transcription response has no string 'text' field")]
pub struct MissingTextError;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
