//! Transcription domain module

mod audio_data;
mod options;
mod request;
mod result;

pub use audio_data::{
    AudioFormat, NormalizedAudio, RawAudio, TARGET_BITS_PER_SAMPLE, TARGET_CHANNELS,
    TARGET_SAMPLE_RATE,
};
pub use options::{TranscriptionOptions, RESPONSE_FORMAT, SPEAKER_PROMPT};
pub use request::{
    decode_inline_audio, AudioSource, TranscriptionRequest, DEFAULT_FILENAME, DEFAULT_LANGUAGE,
};
pub use result::TranscriptionResult;
