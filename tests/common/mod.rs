//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use serde_json::json;
use transcribe_fn::domain::transcription::NormalizedAudio;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock transcription API is mounted at
pub const API_PATH: &str = "/openai/v1/audio/transcriptions";

/// Whether an ffmpeg binary is on PATH
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A 440 Hz tone as 16-bit PCM WAV
pub fn tone_wav(sample_rate: u32, channels: u16, millis: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let frames = sample_rate * millis / 1000;
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for n in 0..frames {
            let t = n as f32 / sample_rate as f32;
            let sample = ((t * 440.0 * std::f32::consts::TAU).sin() * 8_000.0) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// A canonical clip already in the normalized format
pub fn canonical_audio() -> NormalizedAudio {
    NormalizedAudio::from_wav_bytes(tone_wav(16_000, 1, 250)).unwrap()
}

/// Read back the spec of a WAV buffer
pub fn wav_spec(data: &[u8]) -> hound::WavSpec {
    hound::WavReader::new(Cursor::new(data)).unwrap().spec()
}

/// Encode a fixture with the system ffmpeg (e.g. to FLAC). `None` when this
/// ffmpeg build has no encoder for the format.
pub fn encode_with_ffmpeg(dir: &Path, wav: &[u8], ext: &str) -> Option<Vec<u8>> {
    let input = dir.join("fixture-src.wav");
    let output = dir.join(format!("fixture-out.{}", ext));
    std::fs::write(&input, wav).unwrap();
    let status = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    let data = status.success().then(|| std::fs::read(&output).unwrap());
    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
    data
}

/// A typical verbose_json transcription body
pub fn verbose_body(text: &str) -> serde_json::Value {
    json!({
        "task": "transcribe",
        "language": "English",
        "duration": 0.25,
        "text": text,
        "segments": [
            {"id": 0, "seek": 0, "start": 0.0, "end": 0.25, "text": text}
        ],
        "x_groq": {"id": "req_test"}
    })
}

/// Mount a transcription endpoint answering with `response`
pub async fn mount_api(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Base URL for a mock server's transcription API
pub fn api_base(server: &MockServer) -> String {
    format!("{}/openai/v1", server.uri())
}

/// Byte-level substring search (request bodies are multipart with binary parts)
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// A WAV header with no samples
pub fn empty_wav() -> Vec<u8> {
    tone_wav(16_000, 1, 0)
}

/// How the scripted ffmpeg stand-in behaves
#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
pub enum StubMode {
    /// Always writes the canonical clip
    Canonical,
    /// Exits 0 with a header-only WAV when a demuxer is forced
    EmptyWhenHinted,
    /// Exits 1 when a demuxer is forced
    FailWhenHinted,
    /// Exits 1 on every call
    AlwaysFail,
    /// Exits 0 with a header-only WAV on every call
    AlwaysEmpty,
}

/// Shell script standing in for ffmpeg.
///
/// It records one line per call (`hinted` or `auto`) and copies a fixture
/// WAV to its last argument, the output path.
#[cfg(unix)]
pub struct StubFfmpeg {
    dir: tempfile::TempDir,
}

#[cfg(unix)]
impl StubFfmpeg {
    /// Frames in the clip the stand-in writes on success
    pub const FRAMES: u32 = 1_600;

    pub fn new(mode: StubMode) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().join("canonical.wav");
        let empty = dir.path().join("empty.wav");
        std::fs::write(&canonical, tone_wav(16_000, 1, 100)).unwrap();
        std::fs::write(&empty, empty_wav()).unwrap();
        let log = dir.path().join("calls.log");

        let fail = "echo 'Invalid data found when processing input' >&2; exit 1";
        let body = match mode {
            StubMode::Canonical => format!("cp '{}' \"$out\"", canonical.display()),
            StubMode::EmptyWhenHinted => format!(
                "if [ \"$hinted\" = hinted ]; then cp '{}' \"$out\"; else cp '{}' \"$out\"; fi",
                empty.display(),
                canonical.display()
            ),
            StubMode::FailWhenHinted => format!(
                "if [ \"$hinted\" = hinted ]; then {}; fi\ncp '{}' \"$out\"",
                fail,
                canonical.display()
            ),
            StubMode::AlwaysFail => fail.to_string(),
            StubMode::AlwaysEmpty => format!("cp '{}' \"$out\"", empty.display()),
        };

        let script = format!(
            r#"#!/bin/sh
hinted=auto
seen_input=no
prev=""
out=""
for arg in "$@"; do
  if [ "$arg" = "-i" ]; then seen_input=yes; fi
  if [ "$prev" = "-f" ] && [ "$seen_input" = no ]; then hinted=hinted; fi
  prev="$arg"
  out="$arg"
done
echo "$hinted" >> '{log}'
{body}
"#,
            log = log.display(),
            body = body
        );

        let path = dir.path().join("ffmpeg");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("ffmpeg")
    }

    /// `hinted` / `auto`, one entry per invocation
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}
