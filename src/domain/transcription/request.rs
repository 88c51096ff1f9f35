//! Transcription request parsed from an invocation event

use base64::Engine;
use serde_json::{Map, Value};

use crate::domain::error::RequestError;

/// Filename used when the event does not name one
pub const DEFAULT_FILENAME: &str = "audio.wav";

/// Language code used when the event does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Where the audio bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Base64-encoded audio carried in the event
    Inline(String),
    /// Remote audio to download
    Url(String),
}

impl AudioSource {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Url(_) => "url",
        }
    }
}

/// A validated transcription request.
///
/// `audio_data` wins when both sources are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub source: AudioSource,
    pub filename: String,
    pub language: String,
}

impl TranscriptionRequest {
    /// Build a request from an event object.
    ///
    /// Keys holding JSON `null` count as absent.
    pub fn from_event(event: &Value) -> Result<Self, RequestError> {
        let args = event.as_object().ok_or(RequestError::NotAnObject)?;

        let source = if let Some(data) = string_field(args, "audio_data", "a base64 string")? {
            AudioSource::Inline(data)
        } else if let Some(url) = string_field(args, "audio_url", "a URL string")? {
            AudioSource::Url(url)
        } else {
            return Err(RequestError::MissingAudioSource);
        };

        let filename =
            string_field(args, "filename", "a string")?.unwrap_or_else(|| DEFAULT_FILENAME.into());
        let language =
            string_field(args, "language", "a string")?.unwrap_or_else(|| DEFAULT_LANGUAGE.into());

        Ok(Self {
            source,
            filename,
            language,
        })
    }
}

fn string_field(
    args: &Map<String, Value>,
    field: &'static str,
    expected: &'static str,
) -> Result<Option<String>, RequestError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RequestError::InvalidField { field, expected }),
    }
}

/// Decode inline base64 audio.
///
/// ASCII whitespace (line-wrapped payloads) is ignored; anything else that is
/// not standard base64 is rejected.
pub fn decode_inline_audio(encoded: &str) -> Result<Vec<u8>, RequestError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let data = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| RequestError::InvalidBase64(e.to_string()))?;

    if data.is_empty() {
        return Err(RequestError::EmptyAudio);
    }
    Ok(data)
}
