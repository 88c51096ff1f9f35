//! Input resolution: turn a request's audio source into raw bytes

use crate::domain::transcription::{
    decode_inline_audio, AudioSource, RawAudio, TranscriptionRequest,
};

use super::error::HandlerError;
use super::ports::AudioFetcher;

/// Resolves inline or remote audio into `RawAudio`
pub struct InputResolver<F>
where
    F: AudioFetcher,
{
    fetcher: F,
}

impl<F> InputResolver<F>
where
    F: AudioFetcher,
{
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Decode inline audio or download it. The request filename travels along
    /// as the format hint.
    pub async fn resolve(&self, request: &TranscriptionRequest) -> Result<RawAudio, HandlerError> {
        let data = match &request.source {
            AudioSource::Inline(encoded) => decode_inline_audio(encoded)?,
            AudioSource::Url(url) => self.fetcher.fetch(url).await?,
        };

        tracing::debug!(
            source = request.source.kind(),
            bytes = data.len(),
            "Resolved audio input"
        );

        Ok(RawAudio::new(data, Some(request.filename.clone())))
    }
}
