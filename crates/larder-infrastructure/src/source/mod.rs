//! Source collaborators
//!
//! Everything that turns files on disk into calls on a [`larder_domain::SourceListener`]:
//! the initial directory scan and the hot-reload watcher.

pub mod directory;
pub mod watcher;

pub use directory::{SourceDirectory, read_source};
pub use watcher::{SourceEvent, SourceWatcher};
