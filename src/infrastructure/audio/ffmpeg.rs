//! FFmpeg-based audio normalizer adapter

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioNormalizer, ConversionError};
use crate::domain::transcription::{
    AudioFormat, NormalizedAudio, RawAudio, TARGET_CHANNELS, TARGET_SAMPLE_RATE,
};
use crate::infrastructure::temp_file::{suffix_for, ScopedTempFile};

/// Converts any ffmpeg-readable audio into 16 kHz mono PCM16 WAV.
///
/// Input and output are staged through scoped temp files in `temp_dir`;
/// both are gone when `normalize` returns.
pub struct FfmpegNormalizer {
    ffmpeg: PathBuf,
    temp_dir: PathBuf,
}

impl FfmpegNormalizer {
    /// Create a normalizer using the given ffmpeg executable and temp dir
    pub fn new(ffmpeg: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Build FFmpeg args for one conversion attempt
    fn build_ffmpeg_args(input: &Path, output: &Path, hint: Option<AudioFormat>) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-nostdin".to_string(),
            "-y".to_string(),
        ];

        if let Some(format) = hint {
            args.push("-f".to_string());
            args.push(format.demuxer().to_string());
        }

        args.extend([
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(), // Drop cover art and video streams
            "-map_metadata".to_string(),
            "-1".to_string(),
            "-fflags".to_string(),
            "+bitexact".to_string(),
            "-flags:a".to_string(),
            "+bitexact".to_string(),
            "-ar".to_string(),
            TARGET_SAMPLE_RATE.to_string(),
            "-ac".to_string(),
            TARGET_CHANNELS.to_string(),
            "-c:a".to_string(),
            "pcm_s16le".to_string(),
            "-f".to_string(),
            "wav".to_string(),
            output.to_string_lossy().to_string(),
        ]);

        args
    }

    /// Run one ffmpeg conversion to completion
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        hint: Option<AudioFormat>,
    ) -> Result<(), ConversionError> {
        let args = Self::build_ffmpeg_args(input, output, hint);

        let result = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConversionError::FfmpegNotFound(self.ffmpeg.display().to_string())
                } else {
                    ConversionError::SpawnFailed(e.to_string())
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| format!("ffmpeg exited with {}", result.status));
            return Err(ConversionError::DecodeFailed(reason));
        }

        Ok(())
    }

    /// One conversion attempt: run ffmpeg, then read back and validate the output
    async fn attempt(
        &self,
        input: &Path,
        output: &ScopedTempFile,
        hint: Option<AudioFormat>,
    ) -> Result<NormalizedAudio, ConversionError> {
        self.convert(input, output.path(), hint).await?;
        let wav = output
            .read()
            .await
            .map_err(|e| ConversionError::TempFile(e.to_string()))?;
        Ok(NormalizedAudio::from_wav_bytes(wav)?)
    }

    /// Decode with the hinted demuxer, falling back to auto-detection once.
    ///
    /// A failed or unusable decode triggers the retry; a missing binary or a
    /// temp file problem does not.
    async fn convert_with_fallback(
        &self,
        input: &Path,
        output: &ScopedTempFile,
        hint: Option<AudioFormat>,
    ) -> Result<NormalizedAudio, ConversionError> {
        let Some(format) = hint else {
            return self.attempt(input, output, None).await;
        };

        match self.attempt(input, output, Some(format)).await {
            Err(e @ (ConversionError::DecodeFailed(_) | ConversionError::InvalidOutput(_))) => {
                tracing::warn!(
                    hint = %format,
                    error = %e,
                    "Hinted decode failed, retrying with format auto-detection"
                );
                self.attempt(input, output, None).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegNormalizer {
    async fn normalize(&self, audio: &RawAudio) -> Result<NormalizedAudio, ConversionError> {
        if audio.data().is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let temp_err = |e: std::io::Error| ConversionError::TempFile(e.to_string());

        let input = ScopedTempFile::with_contents(
            &self.temp_dir,
            &suffix_for(audio.filename()),
            audio.data(),
        )
        .await
        .map_err(temp_err)?;
        let output = ScopedTempFile::empty_in(&self.temp_dir, ".wav").map_err(temp_err)?;

        self.convert_with_fallback(input.path(), &output, audio.format_hint())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::temp_file::leftover_files;

    #[test]
    fn args_without_hint_let_ffmpeg_detect_format() {
        let args =
            FfmpegNormalizer::build_ffmpeg_args(Path::new("/t/in"), Path::new("/t/out.wav"), None);
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(!args[..input_pos].contains(&"-f".to_string()));
        assert_eq!(args[input_pos + 1], "/t/in");
        assert_eq!(args.last().unwrap(), "/t/out.wav");
    }

    #[test]
    fn args_with_hint_force_demuxer_before_input() {
        let args = FfmpegNormalizer::build_ffmpeg_args(
            Path::new("/t/in.m4a"),
            Path::new("/t/out.wav"),
            Some(AudioFormat::M4a),
        );
        let joined = args.join(" ");
        assert!(joined.contains("-f mov -i /t/in.m4a"));
    }

    #[test]
    fn args_request_canonical_output() {
        let args =
            FfmpegNormalizer::build_ffmpeg_args(Path::new("in"), Path::new("out.wav"), None);
        let joined = args.join(" ");
        assert!(joined.contains("-ar 16000"));
        assert!(joined.contains("-ac 1"));
        assert!(joined.contains("-c:a pcm_s16le"));
        assert!(joined.contains("-f wav out.wav"));
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = FfmpegNormalizer::new("ffmpeg", dir.path());
        let err = normalizer
            .normalize(&RawAudio::new(Vec::new(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::EmptyInput));
        assert!(leftover_files(dir.path()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_ffmpeg_cleans_up_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer =
            FfmpegNormalizer::new(dir.path().join("no-such-ffmpeg"), dir.path());
        let audio = RawAudio::new(vec![0u8; 64], Some("clip.mp3".to_string()));

        let err = normalizer.normalize(&audio).await.unwrap_err();

        assert!(matches!(err, ConversionError::FfmpegNotFound(_)));
        assert!(leftover_files(dir.path()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_temp_dir_is_temp_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = FfmpegNormalizer::new("ffmpeg", dir.path().join("missing-subdir"));
        let err = normalizer
            .normalize(&RawAudio::new(vec![1, 2, 3], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::TempFile(_)));
    }
}
