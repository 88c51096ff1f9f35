//! Transcription infrastructure module

mod groq;

pub use groq::GroqTranscriber;
