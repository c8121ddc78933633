//! C++ declaration model extracted from Doxygen XML.
//!
//! This crate turns Doxygen's XML output into typed records:
//!
//! - [`parse_tree`] / [`parse_compound`]: XML → [`Class`], [`Namespace`], [`Function`]
//! - [`TransformPass`]: normalization passes, e.g. [`PropertyPass`] which
//!   folds `get_x`/`set_x` accessor pairs into [`Property`] entries
//! - [`Index`]: fully-qualified name lookup with lazy per-compound parsing
//! - [`to_json`]: JSON dump of a parsed model
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), refdoc_model::ModelError> {
//! use refdoc_model::{Found, Index, PropertyPass};
//!
//! let mut index = Index::open("doxygen/xml", vec![Box::new(PropertyPass)])?;
//! if let Found::Class(class) = index.find("oneapi::dal::table")? {
//!     println!("{} has {} properties", class.name, class.properties.len());
//! }
//! # Ok(())
//! # }
//! ```

mod dump;
mod error;
#[cfg(test)]
mod fixtures;
mod index;
mod model;
mod names;
mod parser;
mod property;
mod transform;

pub use dump::to_json;
pub use error::ModelError;
pub use index::{CompoundHandle, CompoundKind, Found, Index, ModelLoader};
pub use model::{
    Class, Description, Doc, Entity, Function, Location, Namespace, Parameter, Property, Run,
    RunKind,
};
pub use names::{SEPARATOR, join_name, split_compound_name};
pub use parser::{ParsedModel, parse_class, parse_compound, parse_function, parse_namespace, parse_tree};
pub use property::PropertyPass;
pub use transform::{TransformPass, Transformer};
