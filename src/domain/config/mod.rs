//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_FFMPEG, DEFAULT_MODEL};
