//! Persisted document → link time table.
//!
//! The table survives between build passes as a JSON file:
//!
//! ```text
//! {"entries": {"api/table": {"path": "/docs/api/table.rst", "linked_at": 1700000000.5}}}
//! ```
//!
//! It is loaded at the start of a pass, mutated by the watcher and saved at
//! the end of the pass.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::WatchError;

/// Recorded dependency of one document on the API model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Source file of the document.
    pub path: PathBuf,
    /// Seconds since the Unix epoch when the document was last rendered.
    pub linked_at: f64,
}

/// Staleness of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No dependency recorded.
    Unlinked,
    /// Rendered after the newest source change.
    Linked,
    /// Rendered before the newest source change.
    Stale,
}

/// Link times of all documents that render API entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTable {
    entries: BTreeMap<String, LinkEntry>,
}

impl LinkTable {
    /// Load a table saved by [`save`](Self::save); a missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, WatchError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no link table at {}, starting empty", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(WatchError::io(path, e)),
        }
    }

    /// Write the table, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<(), WatchError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| WatchError::io(parent, e))?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?).map_err(|e| WatchError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| WatchError::io(path, e))
    }

    /// Record that `docname` (backed by `path`) was rendered at `linked_at`.
    pub fn link(&mut self, docname: &str, path: PathBuf, linked_at: f64) {
        self.entries
            .insert(docname.to_owned(), LinkEntry { path, linked_at });
    }

    /// Forget a document. Returns whether it was tracked.
    pub fn remove(&mut self, docname: &str) -> bool {
        self.entries.remove(docname).is_some()
    }

    #[must_use]
    pub fn get(&self, docname: &str) -> Option<&LinkEntry> {
        self.entries.get(docname)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose source file no longer exists; returns their names.
    pub fn retain_existing(&mut self) -> Vec<String> {
        let mut dropped = Vec::new();
        self.entries.retain(|docname, entry| {
            let exists = entry.path.exists();
            if !exists {
                dropped.push(docname.clone());
            }
            exists
        });
        dropped
    }

    /// State of `docname` given the newest modification time of its sources.
    #[must_use]
    pub fn state(&self, docname: &str, newest_source_mtime: f64) -> LinkState {
        match self.entries.get(docname) {
            None => LinkState::Unlinked,
            Some(entry) if entry.linked_at < newest_source_mtime => LinkState::Stale,
            Some(_) => LinkState::Linked,
        }
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
#[must_use]
pub fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}
