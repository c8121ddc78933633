//! reStructuredText rendering of the refdoc declaration model.
//!
//! Source documents reference API entities through directives:
//!
//! ```rst
//! .. api-class:: oneapi::dal::kmeans::descriptor
//! .. api-func:: oneapi::dal::kmeans::train
//! .. api-code:: oneapi::dal::table
//! ```
//!
//! [`DocumentExpander`] replaces those lines with markup built by
//! [`RstBuilder`]; [`BuildPass`] runs the expansion incrementally, only for
//! documents that changed on disk or whose API entities changed.

mod build;
mod builder;
mod directive;
mod error;
mod expand;
#[cfg(test)]
mod fixtures;
mod listing;

pub use build::{BuildPass, BuildReport, BuildSettings};
pub use builder::RstBuilder;
pub use directive::{ApiDirective, ClassDirective, Context, FunctionDirective, ListingDirective};
pub use error::RenderError;
pub use expand::DocumentExpander;
pub use listing::ListingReader;
