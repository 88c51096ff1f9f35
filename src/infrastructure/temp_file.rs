//! Scoped temporary files
//!
//! The file is removed when the guard drops, so every exit path of the
//! owning scope (success, error return, panic unwind) cleans up.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tokio::fs;

/// Name prefix of every temp file this crate creates
pub const TEMP_PREFIX: &str = "transcribe-fn-";

/// Temp file deleted on drop
#[derive(Debug)]
pub struct ScopedTempFile {
    path: TempPath,
}

impl ScopedTempFile {
    /// Create an empty file in `dir` with the given suffix (e.g. `".wav"`)
    pub fn empty_in(dir: &Path, suffix: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?;
        // Close the handle so external tools can reopen the path on any platform
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Create a file in `dir` holding `data`
    pub async fn with_contents(dir: &Path, suffix: &str, data: &[u8]) -> io::Result<Self> {
        let scoped = Self::empty_in(dir, suffix)?;
        fs::write(&scoped.path, data).await?;
        Ok(scoped)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full contents back
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }

    /// Remove the file now, reporting failure instead of ignoring it
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

/// Suffix for a staged input file, derived from the original filename
pub fn suffix_for(filename: Option<&str>) -> String {
    filename
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| ".audio".to_string())
}

/// Temp files of this crate currently present in `dir`
pub fn leftover_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(TEMP_PREFIX) {
            found.push(entry.path());
        }
    }
    Ok(found)
}
