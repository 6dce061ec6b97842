//! Lifecycle Manager
//!
//! Closes instances that are no longer reachable from any source map. Every
//! call here runs outside the registry's write lock; close failures are logged
//! per instance and never stop the remaining closes.
//!
//! ```text
//! registry write lock held             lock released
//! ─────────────────────────────        ──────────────────────────
//! swap source map, publish snapshot
//! supersede_displaced(old, new)  ──►   close_all(displaced)
//! ```

use super::builder::SourceMap;
use super::managed::ManagedResource;
use std::sync::Arc;
use tracing::{debug, info};

/// Stateless coordinator for closing and rolling back instances
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleManager;

impl LifecycleManager {
    /// Create a lifecycle manager
    pub fn new() -> Self {
        Self
    }

    /// Close everything in `old` that `new` no longer holds, by identity
    ///
    /// Returns the number of instances closed by this call.
    pub fn close_displaced(&self, old: &SourceMap, new: Option<&SourceMap>) -> usize {
        let displaced = self.supersede_displaced(old, new);
        self.close_all(displaced)
    }

    /// Mark every instance of `old` missing from `new` as superseded
    ///
    /// Meant to run at the moment the replacing snapshot is published; the
    /// returned instances are then handed to [`Self::close_all`].
    pub fn supersede_displaced(
        &self,
        old: &SourceMap,
        new: Option<&SourceMap>,
    ) -> Vec<Arc<ManagedResource>> {
        old.values()
            .filter(|resource| !new.is_some_and(|map| contains_instance(map, resource)))
            .filter(|resource| resource.supersede())
            .cloned()
            .collect()
    }

    /// Close superseded instances, at most once each
    pub fn close_all<I>(&self, instances: I) -> usize
    where
        I: IntoIterator<Item = Arc<ManagedResource>>,
    {
        let mut closed = 0;
        for resource in instances {
            if resource.close() {
                closed += 1;
            }
        }
        if closed > 0 {
            debug!(closed, "Closed displaced resources");
        }
        closed
    }

    /// Undo a partially built source: close what was already constructed
    pub fn rollback<I>(&self, instances: I) -> usize
    where
        I: IntoIterator<Item = Arc<ManagedResource>>,
    {
        let mut rolled_back = 0;
        for resource in instances {
            if resource.roll_back() {
                rolled_back += 1;
            }
        }
        if rolled_back > 0 {
            info!(rolled_back, "Rolled back partially built source");
        }
        rolled_back
    }
}

fn contains_instance(map: &SourceMap, resource: &Arc<ManagedResource>) -> bool {
    map.get(resource.name())
        .is_some_and(|candidate| Arc::ptr_eq(candidate, resource))
}
