//! Fully-qualified name helpers.

/// Namespace separator used in fully-qualified names.
pub const SEPARATOR: &str = "::";

/// Split a qualified name into `(parent, leaf)` at the last separator.
///
/// A name without separator has an empty parent.
#[must_use]
pub fn split_compound_name(name: &str) -> (&str, &str) {
    name.rsplit_once(SEPARATOR).unwrap_or(("", name))
}

/// Join a parent name and a leaf, omitting the separator for an empty parent.
#[must_use]
pub fn join_name(parent: &str, leaf: &str) -> String {
    if parent.is_empty() {
        leaf.to_owned()
    } else {
        format!("{parent}{SEPARATOR}{leaf}")
    }
}
