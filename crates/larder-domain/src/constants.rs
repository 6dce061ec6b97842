//! Domain-level constants
//!
//! Infrastructure constants (file names, env prefixes) live in
//! `larder_infrastructure::constants`.

// ============================================================================
// SOURCE DOCUMENT CONSTANTS
// ============================================================================

/// Top-level key holding the keyed collection of resource definitions
pub const RESOURCES_KEY: &str = "resources";

/// Per-definition key carrying the resource type tag
pub const TYPE_KEY: &str = "type";

/// File extension for JSON sources
pub const JSON_EXTENSION: &str = "json";

/// File extension for TOML sources
pub const TOML_EXTENSION: &str = "toml";

/// File extensions recognised as configuration sources
pub const SOURCE_EXTENSIONS: &[&str] = &[JSON_EXTENSION, TOML_EXTENSION];
