//! Source change notifications
//!
//! The file watcher (or any other collaborator that discovers configuration
//! changes) talks to the registry through this trait only.

use crate::error::Result;
use crate::value_objects::SourceKey;

/// Receiver of configuration source changes
pub trait SourceListener: Send + Sync {
    /// A source was created or its content changed
    fn on_source_changed(&self, key: SourceKey, raw_content: &str) -> Result<()>;

    /// A source disappeared
    fn on_source_removed(&self, key: &SourceKey) -> Result<()>;
}
