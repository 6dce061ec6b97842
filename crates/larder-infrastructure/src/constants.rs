//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Source document keys are defined in `larder_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "larder.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "larder";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "LARDER";

/// Separator for nested keys in environment variables (`LARDER_REGISTRY__WATCH`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default data directory handed to resources
pub const DEFAULT_DATA_DIR: &str = "data";

// ============================================================================
// WATCHER CONSTANTS
// ============================================================================

/// Delay before reading a changed source, lets writers finish
pub const DEFAULT_RELOAD_DELAY_MS: u64 = 100;

/// Upper bound accepted for the reload delay
pub const MAX_RELOAD_DELAY_MS: u64 = 60_000;

/// Capacity of the watcher's event channel
pub const WATCH_CHANNEL_CAPACITY: usize = 64;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "LARDER_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "larder";
