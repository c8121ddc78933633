//! Error types for XML loading.

use std::path::PathBuf;

/// Error while reading or parsing Doxygen XML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlError {
    /// XML file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// XML parsing error.
    #[error("XML parse error")]
    Parse(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Document has no root element.
    #[error("no root element in {0}")]
    MissingRoot(String),

    /// Compound file does not contain a `compounddef` element.
    #[error("no compounddef in {}", .0.display())]
    MissingCompound(PathBuf),
}
