//! Loading of Doxygen XML output directories.
//!
//! Doxygen writes one file per compound (`<refid>.xml`) plus `index.xml`
//! listing every compound. [`XmlLoader`] reads either a single compound on
//! demand or all of them stitched under one `doxygen` root, which is the
//! output of the `combine.xslt` transform Doxygen ships alongside the index.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::XmlError;
use crate::node::XmlNode;
use crate::parser::XmlParser;

/// Entry of `index.xml`: one documented compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Doxygen reference id, also the compound's file stem.
    pub refid: String,
    /// Compound kind (`class`, `struct`, `namespace`, `file`, ...).
    pub kind: String,
    /// Fully-qualified compound name.
    pub name: String,
}

/// Reader for a Doxygen XML directory.
pub struct XmlLoader {
    dir: PathBuf,
    parser: XmlParser,
}

impl XmlLoader {
    /// Create a loader for the given XML directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parser: XmlParser::new(),
        }
    }

    /// Directory this loader reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse an XML file inside the directory and return its root element.
    pub fn load_file(&self, filename: &str) -> Result<XmlNode, XmlError> {
        let path = self.dir.join(filename);
        let content = fs::read_to_string(&path).map_err(|source| XmlError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("parsing {}", path.display());
        self.parser.parse(&content, &path.to_string_lossy())
    }

    /// Read `index.xml` and list its compounds in document order.
    pub fn load_index(&self) -> Result<Vec<IndexEntry>, XmlError> {
        let root = self.load_file("index.xml")?;
        Ok(root
            .find_all("compound")
            .map(|compound| IndexEntry {
                refid: compound.attr("refid").unwrap_or_default().to_owned(),
                kind: compound.attr("kind").unwrap_or_default().to_owned(),
                name: compound.find_text("name").unwrap_or_default(),
            })
            .collect())
    }

    /// Load the `compounddef` element of a single compound.
    pub fn load_compound(&self, refid: &str) -> Result<XmlNode, XmlError> {
        let root = self.load_file(&format!("{refid}.xml"))?;
        root.children
            .into_iter()
            .find(|c| c.tag == "compounddef")
            .ok_or_else(|| XmlError::MissingCompound(self.dir.join(format!("{refid}.xml"))))
    }

    /// Load every compound listed in the index under a single `doxygen` root.
    ///
    /// Compounds whose file is missing are skipped with a warning, matching
    /// `document()` semantics in the stock transform.
    pub fn load_combined(&self) -> Result<XmlNode, XmlError> {
        let mut combined = XmlNode::new("doxygen");
        for entry in self.load_index()? {
            match self.load_compound(&entry.refid) {
                Ok(compound) => combined.children.push(compound),
                Err(XmlError::Io { path, source }) => {
                    tracing::warn!("skipping {}: {source}", path.display());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(combined)
    }
}
