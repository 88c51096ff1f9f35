//! Groq (OpenAI-compatible) transcription adapter

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::domain::transcription::{
    NormalizedAudio, TranscriptionOptions, TranscriptionResult, RESPONSE_FORMAT,
};
use crate::infrastructure::temp_file::ScopedTempFile;

// Error envelope for OpenAI-compatible APIs

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for `POST {base_url}/audio/transcriptions`.
///
/// Built once per process; the API key is bound at construction and the
/// inner `reqwest::Client` is shared by every call.
pub struct GroqTranscriber {
    api_key: String,
    base_url: String,
    model: String,
    temp_dir: PathBuf,
    client: reqwest::Client,
}

impl GroqTranscriber {
    /// Create a new transcriber with the given API key and default endpoint/model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temp_dir: std::env::temp_dir(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Stage uploads in a different directory
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'))
    }

    /// Build the multipart form
    fn build_form(
        &self,
        wav: Vec<u8>,
        options: &TranscriptionOptions,
    ) -> Result<multipart::Form, TranscriptionError> {
        let file = multipart::Part::bytes(wav)
            .file_name(options.upload_filename())
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::RequestFailed(format!("mime: {}", e)))?;

        Ok(multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("prompt", options.prompt().to_string())
            .text("language", options.language().to_string())
            .text("response_format", RESPONSE_FORMAT))
    }

    /// Pull a readable message out of an error body
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .map(|env| env.error.message)
            .unwrap_or_else(|_| body.trim().to_string())
    }

    /// Stage the WAV through a scoped temp file and read it back for upload
    async fn stage_upload(&self, audio: &NormalizedAudio) -> Result<Vec<u8>, TranscriptionError> {
        let temp_err = |e: std::io::Error| TranscriptionError::TempFile(e.to_string());
        let staged = ScopedTempFile::with_contents(&self.temp_dir, ".wav", audio.data())
            .await
            .map_err(temp_err)?;
        let wav = staged.read().await.map_err(temp_err)?;
        staged.close().map_err(temp_err)?;
        Ok(wav)
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(
        &self,
        audio: &NormalizedAudio,
        options: &TranscriptionOptions,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let wav = self.stage_upload(audio).await?;
        let form = self.build_form(wav, options)?;

        tracing::debug!(
            model = %self.model,
            language = options.language(),
            "Sending audio to transcription API"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status,
                Self::error_message(&body)
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        TranscriptionResult::from_verbose_json(body).map_err(|_| TranscriptionError::MissingText)
    }
}
