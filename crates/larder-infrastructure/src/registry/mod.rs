//! Dynamic resource registry
//!
//! | Module | Role |
//! |--------|------|
//! | [`parser`] | Source document → resource definitions |
//! | [`factory`] | Type tag → constructor dispatch |
//! | [`builder`] | All-or-nothing construction of one source |
//! | [`resource_registry`] | Source table, snapshot publication, lookups |
//! | [`snapshot`] | Immutable merged view |
//! | [`injector`] | Static binding resolution |
//! | [`handle`] | Late-binding named references |
//! | [`lifecycle`] | Supersede, close and rollback bookkeeping |
//! | [`managed`] | Instance wrapper with its lifecycle state |

pub mod builder;
pub mod factory;
pub mod handle;
pub mod injector;
pub mod lifecycle;
pub mod managed;
pub mod parser;
pub mod resource_registry;
pub mod snapshot;

pub use builder::{SourceBuilder, SourceMap};
pub use factory::{Constructor, ResourceFactory};
pub use handle::ResourceHandle;
pub use injector::Injector;
pub use lifecycle::LifecycleManager;
pub use managed::ManagedResource;
pub use parser::DefinitionParser;
pub use resource_registry::{ResourceRegistry, SourceUpdate, StartReport};
pub use snapshot::{ResourceInfo, Snapshot};
