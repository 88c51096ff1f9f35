//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod fetcher;
pub mod normalizer;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use fetcher::{AudioFetcher, FetchError};
pub use normalizer::{AudioNormalizer, ConversionError};
pub use transcriber::{Transcriber, TranscriptionError};
