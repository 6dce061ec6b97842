//! Source identity
//!
//! A source is one configuration document contributing resource definitions.
//! Its key is stable across reloads of the same document and orders the
//! sources when the global snapshot is folded together.

use crate::constants::{JSON_EXTENSION, SOURCE_EXTENSIONS, TOML_EXTENSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a configuration source
///
/// Ordering is byte-wise on the key string; a source with a greater key wins
/// name collisions when the global snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceKey(String);

impl SourceKey {
    /// Create a key from an arbitrary identifier
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Create a key from a file path, canonicalized when the file exists
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Self(canonical.to_string_lossy().into_owned())
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key interpreted as a file system path
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Document syntax implied by the key's extension
    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_path(Path::new(&self.0))
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SourceKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&Path> for SourceKey {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

/// Syntax of a configuration source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JSON document
    #[default]
    Json,
    /// TOML document
    Toml,
}

impl SourceFormat {
    /// Pick the format from a path extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(TOML_EXTENSION) => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Whether a path has one of the recognised source extensions
    pub fn is_source_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SOURCE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }

    /// Canonical file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => JSON_EXTENSION,
            Self::Toml => TOML_EXTENSION,
        }
    }
}
