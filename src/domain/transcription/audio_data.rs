//! Audio value objects: raw input bytes and canonical normalized WAV

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::domain::error::WavFormatError;

/// Sample rate of normalized audio
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Channel count of normalized audio
pub const TARGET_CHANNELS: u16 = 1;

/// Bits per sample of normalized audio
pub const TARGET_BITS_PER_SAMPLE: u16 = 16;

/// Input container formats that may be hinted from a filename extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Ogg,
    Aac,
    M4a,
    Wma,
}

impl AudioFormat {
    /// Every hintable format
    pub const ALL: [AudioFormat; 7] = [
        Self::Mp3,
        Self::Wav,
        Self::Flac,
        Self::Ogg,
        Self::Aac,
        Self::M4a,
        Self::Wma,
    ];

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
            Self::M4a => "m4a",
            Self::Wma => "wma",
        }
    }

    /// Name of the ffmpeg demuxer that reads this container
    pub const fn demuxer(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
            Self::M4a => "mov",
            Self::Wma => "asf",
        }
    }

    /// Look up a format by extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Derive a format hint from a filename. Unknown or absent extensions give `None`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Audio bytes exactly as received, plus the filename used for format hinting.
#[derive(Debug, Clone)]
pub struct RawAudio {
    data: Vec<u8>,
    filename: Option<String>,
}

impl RawAudio {
    /// Create RawAudio from bytes and an optional filename
    pub fn new(data: Vec<u8>, filename: Option<String>) -> Self {
        Self { data, filename }
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the filename, if any
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Format hint derived from the filename extension
    pub fn format_hint(&self) -> Option<AudioFormat> {
        self.filename.as_deref().and_then(AudioFormat::from_filename)
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes())
    }
}

/// WAV bytes guaranteed to be PCM signed 16-bit, 16 kHz, mono.
///
/// The only constructor validates the header, so holding a value of this
/// type is proof that the canonical format was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAudio {
    data: Vec<u8>,
    frames: u32,
}

impl NormalizedAudio {
    /// Validate a WAV buffer against the canonical format
    pub fn from_wav_bytes(data: Vec<u8>) -> Result<Self, WavFormatError> {
        let reader = hound::WavReader::new(Cursor::new(data.as_slice()))
            .map_err(|e| WavFormatError::Unreadable(e.to_string()))?;
        let spec = reader.spec();

        if spec.sample_format != hound::SampleFormat::Int {
            return Err(WavFormatError::NotIntegerPcm);
        }
        check("sample rate", TARGET_SAMPLE_RATE, spec.sample_rate)?;
        check("channel count", TARGET_CHANNELS.into(), spec.channels.into())?;
        check(
            "bits per sample",
            TARGET_BITS_PER_SAMPLE.into(),
            spec.bits_per_sample.into(),
        )?;

        let frames = reader.duration();
        if frames == 0 {
            return Err(WavFormatError::NoSamples);
        }
        Ok(Self { data, frames })
    }

    /// Get the WAV bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of sample frames
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.frames) * 1000 / u64::from(TARGET_SAMPLE_RATE)
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.data.len())
    }
}

fn check(field: &'static str, expected: u32, actual: u32) -> Result<(), WavFormatError> {
    if expected == actual {
        Ok(())
    } else {
        Err(WavFormatError::Mismatch {
            field,
            expected,
            actual,
        })
    }
}

fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
