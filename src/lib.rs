//! transcribe-fn - audio transcription function
//!
//! Accepts audio inline (base64) or by URL, normalizes it to 16 kHz mono
//! PCM16 WAV with ffmpeg, and forwards it to a Whisper-compatible
//! transcription API.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Requests, audio value objects, the response envelope, and errors
//! - **Application**: The request handler and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP fetch, FFmpeg, Groq API, config file)
//! - **CLI**: Command-line invocation surface, logging, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
