//! HTTP audio fetcher adapter

use async_trait::async_trait;

use crate::application::ports::{AudioFetcher, FetchError};

/// Downloads audio with a plain GET. Redirects follow reqwest's defaults.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
}

impl HttpAudioFetcher {
    /// Create a new fetcher with its own connection pool
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a fetcher sharing an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Only absolute http(s) URLs are fetched
    fn parse_url(url: &str) -> Result<reqwest::Url, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(FetchError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                url, other
            ))),
        }
    }
}

impl Default for HttpAudioFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = Self::parse_url(url)?;

        tracing::debug!(host = url.host_str().unwrap_or(""), "Downloading audio");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp3"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let fetcher = HttpAudioFetcher::new();
        let body = fetcher
            .fetch(&format!("{}/clip.mp3", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn not_found_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpAudioFetcher::new();
        let err = fetcher
            .fetch(&format!("{}/missing.mp3", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::BadStatus(404));
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let fetcher = HttpAudioFetcher::new();
        let err = fetcher.fetch("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn rejects_relative_url() {
        let fetcher = HttpAudioFetcher::new();
        let err = fetcher.fetch("clip.mp3").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_request_failed() {
        // Bind then drop a listener to get a port nobody is serving
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = HttpAudioFetcher::new();
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{}/a.wav", port))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed(_)));
    }
}
