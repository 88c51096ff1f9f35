//! Invocation response envelope

use serde::Serialize;
use serde_json::Value;

use super::transcription::TranscriptionResult;

/// Response body: either the transcription or an error message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        transcription_text: String,
        full_transcription: Value,
    },
    Failure {
        error: String,
    },
}

/// `{statusCode, body}` as returned to the hosting platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

impl Response {
    /// 200 response carrying the transcription
    pub fn success(result: TranscriptionResult) -> Self {
        let (text, full) = result.into_parts();
        Self {
            status_code: 200,
            body: ResponseBody::Success {
                transcription_text: text,
                full_transcription: full,
            },
        }
    }

    /// Error response with the given status
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            body: ResponseBody::Failure {
                error: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Error message, if this is a failure response
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Failure { error } => Some(error),
            ResponseBody::Success { .. } => None,
        }
    }
}
