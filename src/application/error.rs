//! Handler error taxonomy and its mapping to response status codes

use thiserror::Error;

use crate::domain::error::RequestError;

use super::ports::{ConversionError, FetchError, TranscriptionError};

/// Closed set of failure kinds a caller can distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing input
    Validation,
    /// Audio download failed below the HTTP status level
    Transport,
    /// Audio could not be decoded or re-encoded
    Conversion,
    /// The transcription service failed
    Transcription,
}

impl ErrorKind {
    /// Status code reported to the caller
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Transport | Self::Conversion | Self::Transcription => 500,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Conversion => "conversion",
            Self::Transcription => "transcription",
        }
    }
}

/// Any failure of a single invocation
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

impl HandlerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) => ErrorKind::Validation,
            Self::Fetch(FetchError::BadStatus(_) | FetchError::InvalidUrl(_)) => {
                ErrorKind::Validation
            }
            Self::Fetch(FetchError::RequestFailed(_)) => ErrorKind::Transport,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::Transcription(_) => ErrorKind::Transcription,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
