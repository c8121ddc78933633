//! Per-document staleness decisions for one incremental pass.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::WatchError;
use crate::links::{LinkState, LinkTable, now};
use crate::process::Extractor;
use crate::timer::FileModificationTimer;

/// Directories the watcher compares link times against.
#[derive(Debug, Clone)]
pub struct WatchPaths {
    /// Directory holding the source documents (`<docname>.rst`).
    pub source_dir: PathBuf,
    /// Directory holding the extracted XML dump.
    pub xml_dir: PathBuf,
    /// Root of the header tree.
    pub include_dir: PathBuf,
    /// Header file pattern, e.g. `*.hpp`.
    pub header_pattern: String,
}

/// Behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchSettings {
    /// Treat every linked document as outdated.
    pub always_rebuild: bool,
    /// Log every outdated document.
    pub debug: bool,
}

/// Staleness tracker over a borrowed link table.
///
/// The table is loaded by the caller before the pass and saved after it.
pub struct ProjectWatcher<'a> {
    links: &'a mut LinkTable,
    source_dir: PathBuf,
    xml_timer: FileModificationTimer,
    header_timer: FileModificationTimer,
    extractor: Box<dyn Extractor + 'a>,
    settings: WatchSettings,
}

impl<'a> ProjectWatcher<'a> {
    pub fn new(
        links: &'a mut LinkTable,
        paths: WatchPaths,
        extractor: Box<dyn Extractor + 'a>,
        settings: WatchSettings,
    ) -> Self {
        Self {
            links,
            xml_timer: FileModificationTimer::new(paths.xml_dir, "*.xml"),
            header_timer: FileModificationTimer::new(paths.include_dir, paths.header_pattern),
            source_dir: paths.source_dir,
            extractor,
            settings,
        }
    }

    /// Record that `docname` was rendered from the API model just now.
    pub fn link_document(&mut self, docname: &str) {
        let path = self.source_dir.join(format!("{docname}.rst"));
        tracing::debug!(docname, "Linking document");
        self.links.link(docname, path, now());
    }

    #[must_use]
    pub fn links(&self) -> &LinkTable {
        self.links
    }

    /// Documents whose link time predates the newest XML or header change.
    ///
    /// Entries for `modified` documents are dropped since the caller rebuilds
    /// them anyway; entries for `removed` documents and for documents whose
    /// source file vanished are forgotten. When the XML dump is older than
    /// the headers the extractor runs first and its failure aborts the query.
    pub fn get_outdated_documents(
        &mut self,
        modified: &BTreeSet<String>,
        removed: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, WatchError> {
        for docname in modified.iter().chain(removed) {
            self.links.remove(docname);
        }
        for docname in self.links.retain_existing() {
            tracing::warn!(docname = %docname, "Dropping link of vanished document");
        }

        let mut xml_mtime = self.xml_timer.newest_mtime()?;
        let header_mtime = self.header_timer.newest_mtime()?;
        if xml_mtime < header_mtime {
            tracing::info!("XML dump is older than headers, re-extracting");
            self.extractor.run()?;
            xml_mtime = self.xml_timer.newest_mtime()?;
        }

        let newest = xml_mtime.max(header_mtime);
        let outdated: BTreeSet<String> = self
            .links
            .iter()
            .filter(|(docname, _)| {
                self.settings.always_rebuild
                    || self.links.state(docname, newest) == LinkState::Stale
            })
            .map(|(docname, _)| docname.to_owned())
            .collect();

        if self.settings.debug {
            for docname in &outdated {
                tracing::info!("OUTDATED {docname}");
            }
        }
        Ok(outdated)
    }
}
