//! Invocation runner

use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::application::ports::{AudioFetcher, AudioNormalizer, ConfigStore, Transcriber};
use crate::application::TranscribeHandler;
use crate::domain::config::AppConfig;
use crate::domain::response::Response;
use crate::infrastructure::{FfmpegNormalizer, GroqTranscriber, HttpAudioFetcher, XdgConfigStore};

use super::args::InvokeArgs;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Handler wired to the production adapters
pub type DefaultHandler = TranscribeHandler<HttpAudioFetcher, FfmpegNormalizer, GroqTranscriber>;

/// Run `invoke`: one event from a file or stdin, or a file of NDJSON events
pub async fn run_invoke(args: InvokeArgs) -> ExitCode {
    let presenter = Presenter::new();

    let config = load_merged_config(args.config_overrides()).await;

    // Built once and reused for every event
    let handler = match build_handler(&config) {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(path) = args.events.as_deref() {
        return run_batch(&handler, path, &presenter).await;
    }

    let raw = match read_event(args.event.as_deref()).await {
        Ok(raw) => raw,
        Err(e) => {
            presenter.error(&format!("Failed to read event: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let response = respond(&handler, &raw).await;
    match presenter.response(&response, args.pretty) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Failed to write response: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Process each non-blank line of `path` as an event
async fn run_batch(handler: &DefaultHandler, path: &Path, presenter: &Presenter) -> ExitCode {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            presenter.error(&format!("Failed to read {}: {}", path.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut failed = 0usize;
    let mut total = 0usize;
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        total += 1;
        let response = respond(handler, line).await;
        if !response.is_success() {
            failed += 1;
        }
        if let Err(e) = presenter.response(&response, false) {
            presenter.error(&format!("Failed to write response: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    }

    tracing::info!(total, failed, "Processed event batch");
    ExitCode::from(EXIT_SUCCESS)
}

/// Parse event text and run it through the handler.
///
/// Text that is not JSON becomes a 400 response rather than a process error.
pub async fn respond<F, N, T>(handler: &TranscribeHandler<F, N, T>, raw: &str) -> Response
where
    F: AudioFetcher,
    N: AudioNormalizer,
    T: Transcriber,
{
    match serde_json::from_str::<Value>(raw) {
        Ok(event) => handler.handle(&event).await,
        Err(e) => {
            tracing::warn!(error = %e, "Event is not valid JSON");
            Response::error(400, format!("Invalid event JSON: {}", e))
        }
    }
}

async fn read_event(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        }
    }
}

/// Wire the production adapters from configuration
pub fn build_handler(config: &AppConfig) -> Result<DefaultHandler, String> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        "Missing API key. Set GROQ_API_KEY environment variable or run 'transcribe-fn config set api_key <key>'".to_string()
    })?;

    let temp_dir = config.temp_dir_or_default();
    if !temp_dir.is_dir() {
        return Err(format!(
            "Temp directory does not exist: {}",
            temp_dir.display()
        ));
    }

    let transcriber = GroqTranscriber::new(api_key)
        .with_base_url(config.base_url_or_default())
        .with_model(config.model_or_default())
        .with_temp_dir(&temp_dir);
    let normalizer = FfmpegNormalizer::new(config.ffmpeg_path_or_default(), &temp_dir);

    tracing::debug!(
        base_url = config.base_url_or_default(),
        model = config.model_or_default(),
        ffmpeg = %config.ffmpeg_path_or_default().display(),
        temp_dir = %temp_dir.display(),
        "Handler configured"
    );

    Ok(TranscribeHandler::new(
        HttpAudioFetcher::new(),
        normalizer,
        transcriber,
    ))
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let file_config = XdgConfigStore::new().load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(AppConfig::from_env())
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_handler_requires_api_key() {
        let err = build_handler(&AppConfig::defaults()).err().unwrap();
        assert!(err.contains("GROQ_API_KEY"));
    }

    #[test]
    fn build_handler_rejects_missing_temp_dir() {
        let config = AppConfig {
            api_key: Some("gsk_test".to_string()),
            temp_dir: Some("/definitely/not/here".to_string()),
            ..AppConfig::defaults()
        };
        let err = build_handler(&config).err().unwrap();
        assert!(err.contains("Temp directory"));
    }

    #[tokio::test]
    async fn invalid_json_becomes_400() {
        let config = AppConfig {
            api_key: Some("gsk_test".to_string()),
            ..AppConfig::defaults()
        };
        let handler = build_handler(&config).unwrap();
        let response = respond(&handler, "{not json").await;
        assert_eq!(response.status_code, 400);
        assert!(response.error_message().unwrap().starts_with("Invalid event JSON"));
    }

    #[tokio::test]
    async fn missing_source_becomes_400() {
        let config = AppConfig {
            api_key: Some("gsk_test".to_string()),
            ..AppConfig::defaults()
        };
        let handler = build_handler(&config).unwrap();
        let response = respond(&handler, r#"{"language": "en"}"#).await;
        assert_eq!(response.status_code, 400);
    }
}
