//! Configuration types

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_LOG_LEVEL, DEFAULT_RELOAD_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resource registry settings
    pub registry: RegistryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Resource registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding the resource source files (`*.json`, `*.toml`)
    pub sources_dir: Option<PathBuf>,

    /// Data directory handed to every resource at initialization
    pub data_dir: PathBuf,

    /// Keep watching the sources directory after loading and reload changed
    /// sources until shutdown
    pub watch: bool,

    /// Delay between a change notification and reading the file (milliseconds)
    pub reload_delay_ms: u64,
}

impl RegistryConfig {
    /// Reload delay as a duration
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            sources_dir: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            watch: false,
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
