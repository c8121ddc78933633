//! Error types for model extraction.

use refdoc_xml::XmlError;

/// Error produced while building or querying the declaration model.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A mandatory XML field is missing or invalid.
    ///
    /// Indicates broken output from the extraction tool; the affected entity
    /// is not parsed.
    #[error("malformed input in {entity}: {message}")]
    MalformedInput {
        /// Compound or member the error was found in.
        entity: String,
        /// What was missing or invalid.
        message: String,
    },

    /// Fully-qualified name is not present in the index.
    #[error("cannot find \"{query}\"")]
    Lookup {
        /// Name that was queried.
        query: String,
    },

    /// XML could not be loaded.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// Model serialization failed.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn malformed(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub(crate) fn lookup(query: impl Into<String>) -> Self {
        Self::Lookup {
            query: query.into(),
        }
    }
}
