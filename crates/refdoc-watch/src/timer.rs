//! Newest modification time of a file set.

use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::error::WatchError;

/// Tracks the newest mtime of files matching a pattern under a directory.
#[derive(Debug, Clone)]
pub struct FileModificationTimer {
    base_dir: PathBuf,
    pattern: String,
}

impl FileModificationTimer {
    /// Watch files matching `pattern` (e.g. `*.hpp`) anywhere below `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            pattern: pattern.into(),
        }
    }

    /// Newest mtime in seconds since the epoch; `0.0` when nothing matches.
    ///
    /// Files that vanish while scanning are ignored.
    pub fn newest_mtime(&self) -> Result<f64, WatchError> {
        let escaped = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        let pattern = format!("{escaped}/**/{}", self.pattern);
        let newest = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter_map(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
            .filter_map(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .fold(0.0, f64::max);
        Ok(newest)
    }
}
