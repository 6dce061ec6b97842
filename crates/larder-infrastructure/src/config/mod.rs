//! Configuration
//!
//! Application settings loaded with Figment: defaults, then a TOML file, then
//! `LARDER_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LoggingConfig, RegistryConfig};
