//! Remote audio fetch port interface

use async_trait::async_trait;
use thiserror::Error;

/// Audio download errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to download audio from URL. Status code: {0}")]
    BadStatus(u16),

    #[error("Invalid audio URL: {0}")]
    InvalidUrl(String),

    #[error("Audio download failed: {0}")]
    RequestFailed(String),
}

/// Port for downloading audio referenced by URL
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Download the full body at `url`.
    ///
    /// A response with a non-success status is `FetchError::BadStatus`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
