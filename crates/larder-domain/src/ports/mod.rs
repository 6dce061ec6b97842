//! Ports
//!
//! Contracts between the registry core and its collaborators: pluggable
//! resources, the kinds that construct them, the consumers that receive them
//! and the watcher that reports source changes.

pub mod injection;
pub mod listener;
pub mod registry;
pub mod resource;

pub use injection::{Binding, Injectable, InjectionReport, assign_dyn, assign_slot};
pub use listener::SourceListener;
pub use registry::{RESOURCE_TYPES, ResourceConstructor, ResourceTypeEntry, list_resource_types};
pub use resource::{Resource, ResourceContext, ResourceState};
