//! Source file watcher for hot-reloading
//!
//! Watches a source directory and drives a [`SourceListener`] from file
//! system events. The notify callback only classifies and forwards events;
//! a tokio task waits for the reload delay, coalesces what arrived in the
//! meantime (last event per path wins) and applies each change on the
//! blocking pool, since rebuilding a source may block.

use crate::constants::WATCH_CHANNEL_CAPACITY;
use crate::error_ext::ErrorContext;
use larder_domain::error::{Error, Result};
use larder_domain::{SourceFormat, SourceKey, SourceListener};
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// A change to one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// Created, written or renamed into place
    Changed(PathBuf),
    /// Deleted or renamed away
    Removed(PathBuf),
}

impl SourceEvent {
    /// The affected file
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// File watcher feeding a source listener
pub struct SourceWatcher {
    root: PathBuf,
    task: JoinHandle<()>,
    _watcher: RecommendedWatcher,
}

impl SourceWatcher {
    /// Start watching `root`
    ///
    /// Must be called from within a tokio runtime. Watching stops when the
    /// returned value is dropped.
    pub fn start<P: AsRef<Path>>(
        root: P,
        listener: Arc<dyn SourceListener>,
        reload_delay: Duration,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            Error::configuration_with_source("Source watching requires a Tokio runtime", e)
        })?;
        let root = std::fs::canonicalize(root.as_ref()).io_context(format!(
            "Failed to resolve source directory {}",
            root.as_ref().display()
        ))?;

        let (sender, receiver) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for source_event in Self::classify(&event) {
                        // Receiver gone means the watcher is shutting down
                        if sender.blocking_send(source_event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "File watch error"),
            },
            Config::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&root, RecursiveMode::NonRecursive)
            .context("Failed to watch source directory")?;

        let task = runtime.spawn(Self::run(receiver, listener, reload_delay));
        info!(dir = %root.display(), delay = ?reload_delay, "Watching source directory");

        Ok(Self {
            root,
            task,
            _watcher: watcher,
        })
    }

    /// The watched directory, canonicalized
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a file system event to source events, ignoring non-source files
    pub fn classify(event: &Event) -> Vec<SourceEvent> {
        let sources = || {
            event
                .paths
                .iter()
                .filter(|path| SourceFormat::is_source_path(path))
                .cloned()
        };

        match event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                let mut events = Vec::with_capacity(2);
                let source_path = |path: &&PathBuf| SourceFormat::is_source_path(path);
                if let Some(from) = event.paths.first().filter(source_path) {
                    events.push(SourceEvent::Removed(from.clone()));
                }
                if let Some(to) = event.paths.get(1).filter(source_path) {
                    events.push(SourceEvent::Changed(to.clone()));
                }
                events
            }
            EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                sources().map(SourceEvent::Removed).collect()
            }
            EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Name(_)) => {
                sources().map(SourceEvent::Changed).collect()
            }
            _ => Vec::new(),
        }
    }

    async fn run(
        mut receiver: Receiver<SourceEvent>,
        listener: Arc<dyn SourceListener>,
        reload_delay: Duration,
    ) {
        while let Some(first) = receiver.recv().await {
            // Give writers time to finish before reading
            tokio::time::sleep(reload_delay).await;

            let mut pending = BTreeMap::new();
            pending.insert(first.path().to_path_buf(), first);
            while let Ok(next) = receiver.try_recv() {
                pending.insert(next.path().to_path_buf(), next);
            }

            for event in pending.into_values() {
                let listener = Arc::clone(&listener);
                let applied =
                    tokio::task::spawn_blocking(move || Self::apply(listener.as_ref(), event))
                        .await;
                if let Err(e) = applied {
                    error!(error = %e, "Source reload task failed");
                }
            }
        }
        debug!("Source watcher stopped");
    }

    fn apply(listener: &dyn SourceListener, event: SourceEvent) {
        let path = event.path();
        if matches!(event, SourceEvent::Removed(_)) && !path.exists() {
            Self::remove(listener, path);
            return;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let key = SourceKey::from_path(path);
                debug!(source = %key, "Source changed");
                if let Err(e) = listener.on_source_changed(key.clone(), &content) {
                    warn!(source = %key, error = %e, "Failed to apply source change");
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Self::remove(listener, path),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to read changed source"),
        }
    }

    fn remove(listener: &dyn SourceListener, path: &Path) {
        let key = SourceKey::from_path(path);
        debug!(source = %key, "Source removed");
        if let Err(e) = listener.on_source_removed(&key) {
            warn!(source = %key, error = %e, "Failed to apply source removal");
        }
    }
}

impl Drop for SourceWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
