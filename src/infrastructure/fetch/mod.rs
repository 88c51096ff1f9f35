//! Remote audio fetch module

mod http;

pub use http::HttpAudioFetcher;
