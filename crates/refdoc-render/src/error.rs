//! Error types for document rendering.

use std::path::PathBuf;

use refdoc_model::ModelError;
use refdoc_watch::WatchError;

/// Error raised while rendering or expanding documents.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Model lookup or parsing failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Staleness tracking failed.
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// I/O error on a source, header or output file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A class body lies outside its header file.
    #[error("invalid listing in {}: {message}", path.display())]
    Listing {
        /// Header file.
        path: PathBuf,
        /// What is wrong with the requested range.
        message: String,
    },

    /// A document uses an `api-*` directive nobody registered.
    #[error("{document}:{line}: unknown directive `{name}`")]
    UnknownDirective {
        document: String,
        name: String,
        line: usize,
    },

    /// A directive was written without its argument.
    #[error("{document}:{line}: directive `{name}` requires an argument")]
    MissingArgument {
        document: String,
        name: String,
        line: usize,
    },

    /// Invalid document pattern.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
