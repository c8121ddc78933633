//! Error types for rebuild tracking.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Error while checking or persisting document staleness.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WatchError {
    /// The extraction tool ran and reported failure.
    #[error("extraction tool `{command}` failed: {status}")]
    ExtractionTool {
        /// Shell command that was run.
        command: String,
        /// Exit status of the command.
        status: ExitStatus,
    },

    /// The extraction tool could not be started.
    #[error("cannot start extraction tool `{command}`: {source}")]
    Spawn {
        /// Shell command that was run.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// I/O error on a state or source file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Link table could not be (de)serialized.
    #[error("link table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid file pattern.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl WatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
