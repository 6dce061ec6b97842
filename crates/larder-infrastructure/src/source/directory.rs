//! Source directory scanning
//!
//! Collects the `*.json` / `*.toml` documents directly inside a configuration
//! directory as the registry's initial batch of sources.

use crate::error_ext::ErrorContext;
use larder_domain::error::{Error, Result};
use larder_domain::{SourceFormat, SourceKey};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A directory of source documents
#[derive(Debug, Clone)]
pub struct SourceDirectory {
    root: PathBuf,
}

impl SourceDirectory {
    /// Wrap `root`; nothing is read until [`Self::scan`]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The scanned directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source files directly inside the directory, sorted by file name
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::io(format!(
                "Source directory not found: {}",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.io_context(format!(
                "Failed to scan source directory {}",
                self.root.display()
            ))?;
            if entry.file_type().is_file() && SourceFormat::is_source_path(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        debug!(dir = %self.root.display(), sources = paths.len(), "Scanned source directory");
        Ok(paths)
    }

    /// Read every source file, keyed by canonical path
    ///
    /// An unreadable file is logged and left out of the batch.
    pub fn read_sources(&self) -> Result<Vec<(SourceKey, String)>> {
        let sources = self
            .scan()?
            .into_iter()
            .filter_map(|path| match read_source(&path) {
                Ok(source) => Some(source),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable source");
                    None
                }
            })
            .collect();
        Ok(sources)
    }
}

/// Read one source file
pub fn read_source(path: &Path) -> Result<(SourceKey, String)> {
    let content = std::fs::read_to_string(path)
        .io_context(format!("Failed to read source file {}", path.display()))?;
    Ok((SourceKey::from_path(path), content))
}
