//! # Larder
//!
//! A registry of named, typed resources declared in JSON or TOML source files.
//! Each source is rebuilt as a whole when its file changes; readers always see
//! a consistent snapshot and replaced instances are closed exactly once.
//!
//! ## Example
//!
//! ```no_run
//! use larder::{PropertiesResource, ResourceRegistry, RegistryConfig};
//!
//! let registry = ResourceRegistry::from_config(&RegistryConfig::default());
//! registry.update_source(
//!     "site.json".into(),
//!     r#"{ "resources": { "site": { "type": "properties", "title": "Docs" } } }"#,
//! )?;
//! let site = registry.get_as::<PropertiesResource>("site")?;
//! assert_eq!(site.get_str("title"), Some("Docs"));
//! # Ok::<(), larder::Error>(())
//! ```
//!
//! ## Layers
//!
//! - `domain` - resource contract, definitions, error taxonomy
//! - `infrastructure` - registry, config, logging, source watching
//! - `providers` - built-in resource kinds

/// Domain layer - resource contract and value objects
pub mod domain {
    pub use larder_domain::*;
}

/// Infrastructure layer - registry engine, config and logging
pub mod infrastructure {
    pub use larder_infrastructure::*;
}

/// Built-in resource kinds
pub mod providers {
    pub use larder_providers::*;
}

pub mod app;

pub use domain::*;
pub use infrastructure::{
    AppConfig, ConfigLoader, RegistryConfig, ResourceFactory, ResourceHandle, ResourceRegistry,
    Snapshot, SourceDirectory, SourceWatcher,
};
pub use providers::{MarkdownRenderer, PropertiesResource, TemplateEngine};
