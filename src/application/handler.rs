//! Transcription function handler
//!
//! Runs one invocation through a fixed linear pipeline:
//! validate → resolve input → normalize → transcribe → format response.
//! Every failure ends the pipeline and becomes a `{statusCode, {error}}`
//! response; nothing is retried.

use std::fmt;
use std::time::Instant;

use serde_json::Value;

use crate::domain::response::Response;
use crate::domain::transcription::{
    TranscriptionOptions, TranscriptionRequest, TranscriptionResult,
};

use super::error::HandlerError;
use super::ports::{AudioFetcher, AudioNormalizer, Transcriber};
use super::resolve::InputResolver;

/// Pipeline stage, used to tag log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Resolving,
    Normalizing,
    Transcribing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Normalizing => "normalizing",
            Self::Transcribing => "transcribing",
        };
        f.write_str(s)
    }
}

/// The request handler. Holds its collaborators for the life of the process,
/// so one transcription client serves every invocation.
pub struct TranscribeHandler<F, N, T>
where
    F: AudioFetcher,
    N: AudioNormalizer,
    T: Transcriber,
{
    resolver: InputResolver<F>,
    normalizer: N,
    transcriber: T,
}

impl<F, N, T> TranscribeHandler<F, N, T>
where
    F: AudioFetcher,
    N: AudioNormalizer,
    T: Transcriber,
{
    /// Create a new handler instance
    pub fn new(fetcher: F, normalizer: N, transcriber: T) -> Self {
        Self {
            resolver: InputResolver::new(fetcher),
            normalizer,
            transcriber,
        }
    }

    /// Handle one event and always produce a response
    pub async fn handle(&self, event: &Value) -> Response {
        let started = Instant::now();
        match self.execute(event).await {
            Ok(result) => {
                tracing::info!(
                    text_bytes = result.text().len(),
                    segments = result.segment_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transcription succeeded"
                );
                Response::success(result)
            }
            Err((stage, e)) => {
                let status = e.status_code();
                if status >= 500 {
                    tracing::error!(%stage, kind = e.kind().as_str(), error = %e, "Invocation failed");
                } else {
                    tracing::warn!(%stage, kind = e.kind().as_str(), error = %e, "Invocation rejected");
                }
                Response::error(status, e.to_string())
            }
        }
    }

    /// Run the pipeline, returning the stage a failure happened in
    pub async fn execute(
        &self,
        event: &Value,
    ) -> Result<TranscriptionResult, (Stage, HandlerError)> {
        let request = TranscriptionRequest::from_event(event)
            .map_err(|e| (Stage::Validating, HandlerError::from(e)))?;

        tracing::debug!(
            source = request.source.kind(),
            filename = %request.filename,
            language = %request.language,
            "Accepted request"
        );

        let raw = self
            .resolver
            .resolve(&request)
            .await
            .map_err(|e| (Stage::Resolving, e))?;

        let wav = self
            .normalizer
            .normalize(&raw)
            .await
            .map_err(|e| (Stage::Normalizing, HandlerError::from(e)))?;

        tracing::debug!(
            input = %raw.human_readable_size(),
            output = %wav.human_readable_size(),
            duration_ms = wav.duration_ms(),
            "Normalized audio"
        );

        let options = TranscriptionOptions::new(&request.filename, &request.language);
        self.transcriber
            .transcribe(&wav, &options)
            .await
            .map_err(|e| (Stage::Transcribing, HandlerError::from(e)))
    }
}
