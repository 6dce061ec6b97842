//! # Larder Infrastructure
//!
//! The resource registry and the services around it.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Parsing, construction, snapshot publication, injection, lifecycle |
//! | [`source`] | Source directory scanning and file watching |
//! | [`config`] | Figment-based configuration loading |
//! | [`logging`] | Tracing subscriber setup |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Defaults and limits |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod registry;
pub mod source;

pub use config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig, RegistryConfig};
pub use registry::{
    DefinitionParser, Injector, LifecycleManager, ResourceFactory, ResourceHandle, ResourceInfo,
    ResourceRegistry, Snapshot, SourceBuilder, SourceUpdate, StartReport,
};
pub use source::{SourceDirectory, SourceWatcher};
