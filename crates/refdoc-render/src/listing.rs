//! Verbatim class declarations read from header files.
//!
//! A listing starts at the class line, extended backwards over the directly
//! preceding lines (e.g. `template <...>`) up to the first blank or comment
//! line, and runs to the line holding the closing brace. Lines carrying the
//! comment marker are dropped. Adjacent getter declarations, and adjacent
//! setter declarations, are pulled together by removing the blank line
//! between them.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use refdoc_model::{Class, Location};

use crate::error::RenderError;

static GETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" get_\w+ *\(").expect("valid regex"));
static SETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" set_\w+ *\(").expect("valid regex"));

/// Lines of one header with the listings already cut from it.
struct FileListing {
    lines: Vec<String>,
    classes: HashMap<String, Vec<String>>,
}

impl FileListing {
    fn read(path: &Path) -> Result<Self, RenderError> {
        let content = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        tracing::debug!("read header {}", path.display());
        Ok(Self {
            lines: content.lines().map(str::to_owned).collect(),
            classes: HashMap::new(),
        })
    }

    fn listing(
        &mut self,
        path: &Path,
        class: &Class,
        marker: &str,
    ) -> Result<Vec<String>, RenderError> {
        let listing = match self.classes.entry(class.fully_qualified_name.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(cut(&self.lines, path, &class.location, marker)?)
            }
        };
        Ok(group_accessors(listing))
    }
}

/// Lines of the class body, 1-based `bodystart..=bodyend` plus the
/// uncommented lines directly above it.
fn cut(
    lines: &[String],
    path: &Path,
    location: &Location,
    marker: &str,
) -> Result<Vec<String>, RenderError> {
    let invalid = |message: String| RenderError::Listing {
        path: path.to_path_buf(),
        message,
    };
    if location.bodystart == 0 || location.bodystart > location.bodyend {
        return Err(invalid(format!(
            "invalid body range {}..{}",
            location.bodystart, location.bodyend
        )));
    }
    if location.bodyend > lines.len() {
        return Err(invalid(format!(
            "body ends at line {} but the file has {} lines",
            location.bodyend,
            lines.len()
        )));
    }

    let start = definition_start(lines, location.bodystart - 1, marker);
    Ok(lines[start..location.bodyend]
        .iter()
        .filter(|line| !is_comment(line, marker))
        .map(|line| line.trim_end().to_owned())
        .collect())
}

/// Walk up from the class line while lines are non-blank and uncommented.
fn definition_start(lines: &[String], class_line: usize, marker: &str) -> usize {
    (1..=class_line)
        .rev()
        .find(|&i| {
            let line = lines[i].trim();
            line.is_empty() || is_comment(line, marker)
        })
        .map_or(0, |i| i + 1)
}

/// Comment-only line; trailing comments after code do not count.
fn is_comment(line: &str, marker: &str) -> bool {
    line.trim_start().starts_with(marker)
}

/// Drop blank lines separating two getters or two setters.
fn group_accessors(listing: &[String]) -> Vec<String> {
    let mut grouped: Vec<String> = Vec::with_capacity(listing.len());
    let mut after_getter = false;
    let mut after_setter = false;
    for line in listing {
        if !line.is_empty() {
            let getter = GETTER_RE.is_match(line);
            let setter = SETTER_RE.is_match(line);
            if ((after_getter && getter) || (after_setter && setter))
                && grouped.last().is_some_and(String::is_empty)
            {
                grouped.pop();
            }
            after_getter = getter;
            after_setter = setter;
        }
        grouped.push(line.clone());
    }
    grouped
}

/// Reads class listings, caching each header file once.
pub struct ListingReader {
    base_dir: PathBuf,
    comment_marker: String,
    files: HashMap<PathBuf, FileListing>,
}

impl ListingReader {
    /// Location filenames are resolved against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, comment_marker: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            comment_marker: comment_marker.into(),
            files: HashMap::new(),
        }
    }

    /// Source lines declaring `class`.
    pub fn get_class_listing(&mut self, class: &Class) -> Result<Vec<String>, RenderError> {
        let path = self.base_dir.join(&class.location.filename);
        let file = match self.files.entry(path.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(FileListing::read(&path)?),
        };
        file.listing(&path, class, &self.comment_marker)
    }

    /// Number of header files read so far.
    #[must_use]
    pub fn cached_files(&self) -> usize {
        self.files.len()
    }
}
