//! Resource Port
//!
//! The minimal capability every pluggable resource exposes. Construction is a
//! kind's constructor (see [`crate::ports::registry`]); this trait covers what
//! the registry needs afterwards: downcasting for typed lookups and `close`.
//!
//! ## Lifecycle
//!
//! ```text
//! Defined ─► Initializing ─► Live ─► Superseded ─► Closing ─► Closed
//!                 │
//!                 └─► Defined   (whole-source rollback)
//! ```

use crate::error::Result;
use crate::value_objects::SourceKey;
use downcast_rs::{DowncastSync, impl_downcast};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A named, configured, closeable capability
///
/// Implementations must be `Send + Sync`: once published, an instance is
/// shared by every reader. The registry never serializes calls into a
/// resource's own methods, only its lifecycle transitions.
///
/// # Example
///
/// ```
/// use larder_domain::{Resource, Result};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// impl Resource for Greeter {
///     fn close(&self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Resource: DowncastSync {
    /// Release whatever the resource holds
    ///
    /// Called at most once by the registry, outside any registry lock.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

impl_downcast!(sync Resource);

/// Context handed to a constructor while a resource initializes
#[derive(Debug, Clone)]
pub struct ResourceContext {
    /// Registry-wide data directory
    pub data_dir: PathBuf,
    /// Source contributing the definition
    pub source: SourceKey,
    /// Name of the resource being built
    pub name: String,
}

impl ResourceContext {
    /// Create a context
    pub fn new<N: Into<String>>(data_dir: impl Into<PathBuf>, source: SourceKey, name: N) -> Self {
        Self {
            data_dir: data_dir.into(),
            source,
            name: name.into(),
        }
    }

    /// Resolve a possibly relative path against the data directory
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

/// Lifecycle state of one managed resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResourceState {
    /// Only a definition exists
    #[default]
    Defined = 0,
    /// Constructed but not yet published
    Initializing = 1,
    /// Reachable from the current source table
    Live = 2,
    /// Replaced by a newer snapshot, awaiting close
    Superseded = 3,
    /// `close` is running
    Closing = 4,
    /// `close` returned; terminal
    Closed = 5,
}

impl ResourceState {
    /// Decode a state stored as its discriminant
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Defined),
            1 => Some(Self::Initializing),
            2 => Some(Self::Live),
            3 => Some(Self::Superseded),
            4 => Some(Self::Closing),
            5 => Some(Self::Closed),
            _ => None,
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Defined, Self::Initializing)
                | (Self::Initializing, Self::Live | Self::Defined)
                | (Self::Live, Self::Superseded)
                | (Self::Superseded, Self::Closing)
                | (Self::Closing, Self::Closed)
        )
    }

    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}
