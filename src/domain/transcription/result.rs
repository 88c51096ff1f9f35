//! Transcription result as returned by the remote service

use serde_json::Value;

use crate::domain::error::MissingTextError;

/// Plain text plus the service-native structured response.
///
/// The structured part is kept verbatim; segments, timings and speaker
/// labels are whatever the service sent.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    text: String,
    full: Value,
}

impl TranscriptionResult {
    /// Wrap a verbose JSON response. The object must carry a string `text`.
    pub fn from_verbose_json(full: Value) -> Result<Self, MissingTextError> {
        let text = full
            .get("text")
            .and_then(Value::as_str)
            .ok_or(MissingTextError)?
            .to_string();
        Ok(Self { text, full })
    }

    /// Get the transcribed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the full structured response
    pub fn full(&self) -> &Value {
        &self.full
    }

    /// Number of segments, if the service returned any
    pub fn segment_count(&self) -> Option<usize> {
        self.full
            .get("segments")
            .and_then(Value::as_array)
            .map(Vec::len)
    }

    /// Consume into `(text, full)`
    pub fn into_parts(self) -> (String, Value) {
        (self.text, self.full)
    }
}
