//! Per-call transcription options

use std::path::Path;

/// Instruction sent with every transcription asking for speaker separation
pub const SPEAKER_PROMPT: &str = "Please separate different speakers and label them.";

/// Response shape requested from the service
pub const RESPONSE_FORMAT: &str = "verbose_json";

/// Options for one transcription call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOptions {
    filename: String,
    language: String,
}

impl TranscriptionOptions {
    /// Options for the given upload filename and language, with the speaker prompt
    pub fn new(filename: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            language: language.into(),
        }
    }

    /// Filename for the normalized upload: the original stem with a `.wav` extension
    pub fn upload_filename(&self) -> String {
        let stem = Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("audio");
        format!("{}.wav", stem)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Instruction prompt; always the speaker-separation request
    pub fn prompt(&self) -> &'static str {
        SPEAKER_PROMPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_asks_for_speakers() {
        let opts = TranscriptionOptions::new("a.wav", "en");
        assert!(opts.prompt().contains("speakers"));
    }

    #[test]
    fn upload_filename_swaps_extension() {
        assert_eq!(TranscriptionOptions::new("call.mp3", "en").upload_filename(), "call.wav");
        assert_eq!(TranscriptionOptions::new("audio.wav", "en").upload_filename(), "audio.wav");
        assert_eq!(TranscriptionOptions::new("dir/rec", "en").upload_filename(), "rec.wav");
    }

    #[test]
    fn upload_filename_falls_back() {
        assert_eq!(TranscriptionOptions::new("", "en").upload_filename(), "audio.wav");
    }

    #[test]
    fn prompt_is_fixed_for_every_language() {
        let opts = TranscriptionOptions::new("a.wav", "de");
        assert_eq!(opts.prompt(), SPEAKER_PROMPT);
        assert_eq!(opts.language(), "de");
    }
}
