//! Managed resource instances
//!
//! Wraps one constructed resource with the identity it was built under and
//! its lifecycle state. State changes go through compare-and-swap so that
//! `close` reaches the underlying resource at most once, whichever path
//! (replacement, removal, rollback, registry close) gets there first.

use larder_domain::{Resource, ResourceDefinition, ResourceState, SourceKey};
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, warn};

/// A resource instance owned by exactly one source map
pub struct ManagedResource {
    name: String,
    type_tag: String,
    source: SourceKey,
    instance: Arc<dyn Resource>,
    state: AtomicU8,
}

impl ManagedResource {
    /// Wrap a freshly constructed instance; starts in `Initializing`
    pub fn new(
        definition: &ResourceDefinition,
        source: SourceKey,
        instance: Arc<dyn Resource>,
    ) -> Self {
        Self {
            name: definition.name.clone(),
            type_tag: definition.type_tag.clone(),
            source,
            instance,
            state: AtomicU8::new(ResourceState::Initializing as u8),
        }
    }

    /// Resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag the instance was built from
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Source that owns the instance
    pub fn source(&self) -> &SourceKey {
        &self.source
    }

    /// The shared instance
    pub fn instance(&self) -> &Arc<dyn Resource> {
        &self.instance
    }

    /// Current lifecycle state
    pub fn state(&self) -> ResourceState {
        ResourceState::from_u8(self.state.load(Ordering::Acquire)).unwrap_or(ResourceState::Closed)
    }

    /// Move from `from` to `to` if the instance is still in `from`
    pub fn transition(&self, from: ResourceState, to: ResourceState) -> bool {
        if !from.can_transition_to(to) {
            return false;
        }
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// `Initializing -> Live`
    pub(crate) fn publish(&self) -> bool {
        self.transition(ResourceState::Initializing, ResourceState::Live)
    }

    /// `Live -> Superseded`
    pub(crate) fn supersede(&self) -> bool {
        self.transition(ResourceState::Live, ResourceState::Superseded)
    }

    /// `Superseded -> Closing -> Closed`, invoking the resource's `close`
    ///
    /// Returns `false` without touching the resource when another path
    /// already claimed the close.
    pub(crate) fn close(&self) -> bool {
        if !self.transition(ResourceState::Superseded, ResourceState::Closing) {
            return false;
        }
        self.invoke_close();
        self.state.store(ResourceState::Closed as u8, Ordering::Release);
        true
    }

    /// `Initializing -> Defined`, invoking the resource's `close`
    pub(crate) fn roll_back(&self) -> bool {
        if !self.transition(ResourceState::Initializing, ResourceState::Defined) {
            return false;
        }
        self.invoke_close();
        true
    }

    fn invoke_close(&self) {
        match catch_unwind(AssertUnwindSafe(|| self.instance.close())) {
            Ok(Ok(())) => {
                debug!(resource = %self.name, source = %self.source, "Resource closed");
            }
            Ok(Err(e)) => {
                warn!(
                    resource = %self.name,
                    type_tag = %self.type_tag,
                    source = %self.source,
                    error = %e,
                    "Failed to close resource"
                );
            }
            Err(payload) => {
                warn!(
                    resource = %self.name,
                    type_tag = %self.type_tag,
                    source = %self.source,
                    panic = %panic_message(payload.as_ref()),
                    "Resource panicked while closing"
                );
            }
        }
    }
}

impl fmt::Debug for ManagedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedResource")
            .field("name", &self.name)
            .field("type_tag", &self.type_tag)
            .field("source", &self.source)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
