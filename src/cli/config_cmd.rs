//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{ConfigAction, ConfigKey};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().display().to_string());
            Ok(())
        }
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, ConfigError> {
    ConfigKey::parse(key).ok_or_else(|| {
        let valid: Vec<&str> = ConfigKey::ALL.iter().map(ConfigKey::as_str).collect();
        ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", valid.join(", ")),
        }
    })
}

fn validate_config_value(key: ConfigKey, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::ValidationError {
        key: key.as_str().to_string(),
        message: message.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid("Value must not be empty"));
    }
    if key == ConfigKey::BaseUrl
        && !(value.starts_with("http://") || value.starts_with("https://"))
    {
        return Err(invalid("Value must be an http:// or https:// URL"));
    }
    Ok(())
}

fn field_mut(config: &mut AppConfig, key: ConfigKey) -> &mut Option<String> {
    match key {
        ConfigKey::ApiKey => &mut config.api_key,
        ConfigKey::BaseUrl => &mut config.base_url,
        ConfigKey::Model => &mut config.model,
        ConfigKey::FfmpegPath => &mut config.ffmpeg_path,
        ConfigKey::TempDir => &mut config.temp_dir,
    }
}

/// Display value for a key; the API key is masked
fn display_value(config: &AppConfig, key: ConfigKey) -> String {
    let value = match key {
        ConfigKey::ApiKey => config.api_key.as_deref().map(mask_api_key),
        ConfigKey::BaseUrl => config.base_url.clone(),
        ConfigKey::Model => config.model.clone(),
        ConfigKey::FfmpegPath => config.ffmpeg_path.clone(),
        ConfigKey::TempDir => config.temp_dir.clone(),
    };
    value.unwrap_or_else(|| NOT_SET.to_string())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let key = parse_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *field_mut(&mut config, key) = Some(value.to_string());
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key.as_str(), display_value(&config, key)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    let key = parse_key(key)?;
    let config = store.load().await?;
    presenter.output(&display_value(&config, key));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in ConfigKey::ALL {
        presenter.key_value(key.as_str(), &display_value(&config, key));
    }
    Ok(())
}

/// Mask an API key for display, keeping the first and last four characters
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
