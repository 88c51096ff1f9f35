//! Audio normalization infrastructure module
//!
//! Decoding and resampling are delegated to an external ffmpeg binary.

mod ffmpeg;

pub use ffmpeg::FfmpegNormalizer;
