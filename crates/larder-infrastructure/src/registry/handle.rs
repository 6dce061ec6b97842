//! Resource handles
//!
//! A handle names a resource instead of holding it. Every `get` resolves the
//! name against the registry's current snapshot, so a holder follows reloads
//! without re-injecting.
//!
//! ```text
//! ResourceHandle("mailer") ──get()──► current snapshot ──► instance (latest)
//! ```

use super::snapshot::Snapshot;
use arc_swap::ArcSwap;
use larder_domain::Resource;
use larder_domain::error::Result;
use std::fmt;
use std::sync::Arc;

/// Late-binding reference to a named resource
#[derive(Clone)]
pub struct ResourceHandle {
    name: String,
    current: Arc<ArcSwap<Snapshot>>,
}

impl ResourceHandle {
    pub(crate) fn new(name: String, current: Arc<ArcSwap<Snapshot>>) -> Self {
        Self { name, current }
    }

    /// Name this handle resolves
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The instance currently published under the name
    pub fn get(&self) -> Option<Arc<dyn Resource>> {
        self.current.load().get(&self.name)
    }

    /// The current instance, downcast to `T`
    pub fn get_as<T: Resource>(&self) -> Result<Arc<T>> {
        self.current.load().get_as::<T>(&self.name)
    }

    /// Whether the name is currently published
    pub fn is_available(&self) -> bool {
        self.current.load().contains(&self.name)
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("name", &self.name)
            .field("available", &self.is_available())
            .finish()
    }
}
