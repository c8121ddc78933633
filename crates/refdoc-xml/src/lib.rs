//! Doxygen XML loading for refdoc.
//!
//! Turns the per-compound XML files Doxygen emits into owned [`XmlNode`]
//! trees the model parser can query:
//!
//! - [`XmlParser`]: quick-xml event reader producing an element tree
//! - [`XmlLoader`]: reads `index.xml`, single compounds, or all compounds
//!   stitched together

mod error;
mod loader;
mod node;
mod parser;

pub use error::XmlError;
pub use loader::{IndexEntry, XmlLoader};
pub use node::XmlNode;
pub use parser::XmlParser;
