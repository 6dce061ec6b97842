//! Injection descriptors
//!
//! A consumer type declares, once and statically, which resource names go into
//! which of its slots. The injector resolves each name against the current
//! snapshot and calls the binding's assign function; nothing is discovered at
//! runtime.
//!
//! ```
//! use std::sync::Arc;
//! use larder_domain::{Binding, Injectable, Resource};
//! use larder_domain::ports::assign_slot;
//!
//! struct Mailer;
//! impl Resource for Mailer {}
//!
//! #[derive(Default)]
//! struct Signup {
//!     mailer: Option<Arc<Mailer>>,
//! }
//!
//! impl Injectable for Signup {
//!     const BINDINGS: &'static [Binding<Self>] = &[Binding::new("mailer", "smtp", |c, r| {
//!         assign_slot(&mut c.mailer, r)
//!     })];
//! }
//! ```

use std::sync::Arc;

use crate::ports::resource::Resource;

/// Function writing a resolved resource into a consumer slot
///
/// Returns `false` when the resource is not of the slot's type.
pub type AssignFn<C> = fn(&mut C, &Arc<dyn Resource>) -> bool;

/// One `(slot, resource name)` pair of a consumer type
pub struct Binding<C: 'static> {
    /// Slot label, used in reports and logs
    pub slot: &'static str,
    /// Name looked up in the snapshot
    pub resource: &'static str,
    assign: AssignFn<C>,
}

impl<C: 'static> Binding<C> {
    /// Declare a binding
    pub const fn new(slot: &'static str, resource: &'static str, assign: AssignFn<C>) -> Self {
        Self {
            slot,
            resource,
            assign,
        }
    }

    /// Write `resource` into the consumer's slot
    pub fn apply(&self, consumer: &mut C, resource: &Arc<dyn Resource>) -> bool {
        (self.assign)(consumer, resource)
    }
}

impl<C: 'static> std::fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("slot", &self.slot)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// A consumer type with a static binding descriptor
pub trait Injectable: Sized + 'static {
    /// Declared `(slot, resource name)` bindings
    const BINDINGS: &'static [Binding<Self>];
}

/// Assign a resource into a concretely typed slot
///
/// Leaves the slot untouched and returns `false` on a type mismatch.
pub fn assign_slot<T: Resource>(slot: &mut Option<Arc<T>>, resource: &Arc<dyn Resource>) -> bool {
    match Arc::clone(resource).downcast_arc::<T>() {
        Ok(typed) => {
            *slot = Some(typed);
            true
        }
        Err(_) => false,
    }
}

/// Assign a resource into an untyped slot; always succeeds
pub fn assign_dyn(slot: &mut Option<Arc<dyn Resource>>, resource: &Arc<dyn Resource>) -> bool {
    *slot = Some(Arc::clone(resource));
    true
}

/// Outcome of one injection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// Slots that received a resource
    pub bound: Vec<&'static str>,
    /// Slots whose resource name is absent from the snapshot
    pub missing: Vec<&'static str>,
    /// Slots whose resource exists but has another type
    pub mismatched: Vec<&'static str>,
}

impl InjectionReport {
    /// Whether every declared slot was bound
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}
