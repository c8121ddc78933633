//! One incremental documentation build.
//!
//! A pass loads the link table, works out which documents changed on disk,
//! asks the [`ProjectWatcher`] which linked documents went stale, expands
//! both sets into the output directory and saves the link table again.
//! Documents are expanded in memory first: any error aborts the pass before
//! an output is written or the table is saved. Outputs whose source is gone
//! are removed, linked or not.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use refdoc_model::{Index, PropertyPass};
use refdoc_watch::{
    Extractor, LinkTable, ProcessHandle, ProjectWatcher, WatchPaths, WatchSettings,
};

use crate::directive::Context;
use crate::error::RenderError;
use crate::expand::DocumentExpander;
use crate::listing::ListingReader;

const DOCUMENT_SUFFIX: &str = "rst";

/// Paths and switches of a build pass.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Directory of `.rst` documents with API directives.
    pub source_dir: PathBuf,
    /// Directory receiving expanded documents.
    pub output_dir: PathBuf,
    /// Persisted link table.
    pub state_file: PathBuf,
    /// Project root; listings and the extractor resolve against it.
    pub project_dir: PathBuf,
    /// Doxygen XML output.
    pub xml_dir: PathBuf,
    /// Header tree.
    pub include_dir: PathBuf,
    pub header_pattern: String,
    /// Shell command regenerating the XML.
    pub extractor: String,
    pub comment_marker: String,
    pub watch: WatchSettings,
}

/// What a build pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents whose source changed since the last expansion.
    pub modified: BTreeSet<String>,
    /// Unchanged documents whose API entities changed.
    pub outdated: BTreeSet<String>,
    /// Documents that disappeared from the source directory.
    pub removed: BTreeSet<String>,
    /// Documents written to the output directory.
    pub written: Vec<String>,
}

/// Incremental build over a source directory.
pub struct BuildPass {
    settings: BuildSettings,
    expander: DocumentExpander,
}

impl BuildPass {
    #[must_use]
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            settings,
            expander: DocumentExpander::default(),
        }
    }

    #[must_use]
    pub fn with_expander(mut self, expander: DocumentExpander) -> Self {
        self.expander = expander;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Extraction tool configured for this project.
    #[must_use]
    pub fn process_handle(&self) -> ProcessHandle {
        ProcessHandle::new(&self.settings.extractor, &self.settings.project_dir)
    }

    /// Run a full pass with the configured extraction tool.
    pub fn run(&self) -> Result<BuildReport, RenderError> {
        self.run_with(Box::new(self.process_handle()))
    }

    /// Run a full pass with a specific extractor.
    pub fn run_with(&self, extractor: Box<dyn Extractor + '_>) -> Result<BuildReport, RenderError> {
        self.execute(extractor, true)
    }

    /// Compute outdated documents without expanding anything.
    ///
    /// The link table is still updated: modified, removed and vanished
    /// documents are forgotten. Outputs of removed documents are left for
    /// the next build, which finds them in the output directory.
    pub fn outdated(&self) -> Result<BuildReport, RenderError> {
        self.outdated_with(Box::new(self.process_handle()))
    }

    pub fn outdated_with(
        &self,
        extractor: Box<dyn Extractor + '_>,
    ) -> Result<BuildReport, RenderError> {
        self.execute(extractor, false)
    }

    fn execute(
        &self,
        extractor: Box<dyn Extractor + '_>,
        render: bool,
    ) -> Result<BuildReport, RenderError> {
        let settings = &self.settings;
        let mut links = LinkTable::load(&settings.state_file)?;

        let documents = scan_documents(&settings.source_dir)?;
        let outputs = scan_documents(&settings.output_dir)?;
        let mut report = BuildReport {
            modified: documents
                .iter()
                .filter(|docname| self.is_modified(docname))
                .cloned()
                .collect(),
            removed: links
                .iter()
                .map(|(docname, _)| docname)
                .chain(outputs.iter().map(String::as_str))
                .filter(|docname| !documents.contains(*docname))
                .map(str::to_owned)
                .collect(),
            ..BuildReport::default()
        };

        let mut watcher =
            ProjectWatcher::new(&mut links, self.watch_paths(), extractor, settings.watch);
        report.outdated = watcher.get_outdated_documents(&report.modified, &report.removed)?;
        tracing::info!(
            modified = report.modified.len(),
            outdated = report.outdated.len(),
            removed = report.removed.len(),
            "Computed changes"
        );

        if !render {
            drop(watcher);
            links.save(&settings.state_file)?;
            return Ok(report);
        }

        // Expand everything before touching the output directory.
        let pending: Vec<String> = report.modified.union(&report.outdated).cloned().collect();
        let mut expanded = Vec::with_capacity(pending.len());
        if pending.is_empty() {
            drop(watcher);
        } else {
            let index = Index::open(&settings.xml_dir, vec![Box::new(PropertyPass)])?;
            let listing = ListingReader::new(&settings.project_dir, &settings.comment_marker);
            let mut ctx = Context::new(index, listing, watcher);
            for docname in pending {
                let text = self.expand_document(&mut ctx, &docname)?;
                expanded.push((docname, text));
            }
        }

        for (docname, text) in expanded {
            self.write_output(&docname, &text)?;
            report.written.push(docname);
        }
        for docname in &report.removed {
            let output = self.output_path(docname);
            if output.exists() {
                fs::remove_file(&output).map_err(|e| RenderError::io(&output, e))?;
                tracing::debug!(docname = %docname, "Removed output");
            }
        }

        links.save(&settings.state_file)?;
        Ok(report)
    }

    fn watch_paths(&self) -> WatchPaths {
        WatchPaths {
            source_dir: self.settings.source_dir.clone(),
            xml_dir: self.settings.xml_dir.clone(),
            include_dir: self.settings.include_dir.clone(),
            header_pattern: self.settings.header_pattern.clone(),
        }
    }

    fn source_path(&self, docname: &str) -> PathBuf {
        self.settings
            .source_dir
            .join(format!("{docname}.{DOCUMENT_SUFFIX}"))
    }

    fn output_path(&self, docname: &str) -> PathBuf {
        self.settings
            .output_dir
            .join(format!("{docname}.{DOCUMENT_SUFFIX}"))
    }

    /// Output missing or older than its source.
    fn is_modified(&self, docname: &str) -> bool {
        let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
        match (
            modified(&self.source_path(docname)),
            modified(&self.output_path(docname)),
        ) {
            (Some(source), Some(output)) => output < source,
            _ => true,
        }
    }

    fn expand_document(&self, ctx: &mut Context<'_>, docname: &str) -> Result<String, RenderError> {
        let source_path = self.source_path(docname);
        let source =
            fs::read_to_string(&source_path).map_err(|e| RenderError::io(&source_path, e))?;

        ctx.set_document(docname);
        self.expander.expand(ctx, &source)
    }

    fn write_output(&self, docname: &str, text: &str) -> Result<(), RenderError> {
        let output = self.output_path(docname);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
        }
        fs::write(&output, text).map_err(|e| RenderError::io(&output, e))?;
        tracing::debug!(docname, "Wrote {}", output.display());
        Ok(())
    }
}

/// Document names (relative paths without suffix, `/`-separated) below `dir`.
fn scan_documents(dir: &Path) -> Result<BTreeSet<String>, RenderError> {
    let pattern = format!(
        "{}/**/*.{DOCUMENT_SUFFIX}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let documents = glob::glob(&pattern)?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let relative = path.strip_prefix(dir).ok()?.with_extension("");
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
        .collect();
    Ok(documents)
}
