//! Incremental rebuild tracking.
//!
//! Documents that render API entities are *linked* with a timestamp. At the
//! start of each pass, [`ProjectWatcher::get_outdated_documents`] compares
//! those timestamps with the newest XML dump and header modification times,
//! re-running the extraction tool first when the dump lags behind the
//! headers.
//!
//! ```ignore
//! let mut links = LinkTable::load(&state_file)?;
//! let mut watcher = ProjectWatcher::new(&mut links, paths, Box::new(handle), settings);
//! let outdated = watcher.get_outdated_documents(&modified, &removed)?;
//! // render documents, calling watcher.link_document(docname)
//! links.save(&state_file)?;
//! ```

mod error;
mod links;
mod process;
mod timer;
mod watcher;

pub use error::WatchError;
pub use links::{LinkEntry, LinkState, LinkTable, now};
pub use process::{Extractor, ProcessHandle};
pub use timer::FileModificationTimer;
pub use watcher::{ProjectWatcher, WatchPaths, WatchSettings};
