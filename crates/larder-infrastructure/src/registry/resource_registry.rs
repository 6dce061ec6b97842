//! Registry Core
//!
//! Owns the source table and the published snapshot.
//!
//! ## Write path
//!
//! ```text
//! per-key lock ─► parse ─► build (slow, unlocked)
//!                              │
//!                  write lock: swap table entry, fold, publish, supersede
//!                              │
//!                  close displaced (slow, unlocked)
//! ```
//!
//! Readers load the snapshot pointer and never lock. Writers for different
//! keys only contend on the short publish window; writers for the same key
//! queue on that key's lock.

use super::builder::{SourceBuilder, SourceMap};
use super::factory::ResourceFactory;
use super::handle::ResourceHandle;
use super::injector::Injector;
use super::lifecycle::LifecycleManager;
use super::parser::DefinitionParser;
use super::snapshot::{ResourceInfo, Snapshot};
use crate::config::RegistryConfig;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use larder_domain::error::{Error, Result};
use larder_domain::{Injectable, InjectionReport, Resource, SourceKey, SourceListener};
use std::collections::{BTreeMap, BTreeSet};
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Outcome of a successful source update or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUpdate {
    /// Source that changed
    pub key: SourceKey,
    /// Generation of the snapshot that was published
    pub generation: u64,
    /// Names the source now defines
    pub resources: BTreeSet<String>,
    /// Previous instances closed by this update
    pub closed: usize,
}

/// Outcome of [`ResourceRegistry::start`]
#[derive(Debug, Default)]
pub struct StartReport {
    /// Sources that loaded
    pub loaded: Vec<SourceKey>,
    /// Sources that were rejected, with the reason
    pub failed: Vec<(SourceKey, Error)>,
}

impl StartReport {
    /// Whether every source loaded
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Default)]
struct RegistryState {
    sources: BTreeMap<SourceKey, SourceMap>,
    generation: u64,
    closed: bool,
}

/// Dynamic resource registry
///
/// # Example
///
/// ```ignore
/// let registry = ResourceRegistry::new(Arc::new(ResourceFactory::with_builtin()), "data");
/// let raw = r#"{"resources":{"greeting":{"type":"properties"}}}"#;
/// registry.update_source("app.json".into(), raw)?;
/// let greeting = registry.get("greeting");
/// ```
pub struct ResourceRegistry {
    factory: Arc<ResourceFactory>,
    parser: DefinitionParser,
    builder: SourceBuilder,
    lifecycle: LifecycleManager,
    injector: Injector,
    state: Mutex<RegistryState>,
    current: Arc<ArcSwap<Snapshot>>,
    source_locks: DashMap<SourceKey, Arc<Mutex<()>>>,
    started: AtomicBool,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new(factory: Arc<ResourceFactory>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            builder: SourceBuilder::new(Arc::clone(&factory), data_dir),
            factory,
            parser: DefinitionParser::new(),
            lifecycle: LifecycleManager::new(),
            injector: Injector::new(),
            state: Mutex::new(RegistryState::default()),
            current: Arc::new(ArcSwap::from_pointee(Snapshot::empty())),
            source_locks: DashMap::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Create a registry over the built-in kinds using configured paths
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(Arc::new(ResourceFactory::with_builtin()), &config.data_dir)
    }

    /// The factory used to build instances
    pub fn factory(&self) -> &Arc<ResourceFactory> {
        &self.factory
    }

    /// Data directory handed to constructors
    pub fn data_dir(&self) -> &Path {
        self.builder.data_dir()
    }

    /// Load the initial batch of sources; allowed once
    ///
    /// A second call fails with [`Error::AlreadyStarted`] before any source is
    /// read. A source that fails to load is reported, not fatal.
    pub fn start<I>(&self, sources: I) -> Result<StartReport>
    where
        I: IntoIterator<Item = (SourceKey, String)>,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            error!("Resource registry started twice");
            return Err(Error::AlreadyStarted);
        }

        let mut report = StartReport::default();
        for (key, raw) in sources {
            match self.update_source(key.clone(), &raw) {
                Ok(_) => report.loaded.push(key),
                Err(e @ Error::RegistryClosed) => return Err(e),
                Err(e) => report.failed.push((key, e)),
            }
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            resources = self.current.load().len(),
            "Resource registry started"
        );
        Ok(report)
    }

    /// Whether [`Self::start`] has been called
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Parse and build a source, then publish it in place of its previous map
    ///
    /// On any failure the previous map and snapshot stay as they were.
    /// Identical content is rebuilt from scratch; nothing is cached.
    pub fn update_source(&self, key: SourceKey, raw: &str) -> Result<SourceUpdate> {
        let key_lock = self.source_lock(&key);
        let result = {
            let _serialized = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.update_serialized(key.clone(), raw)
        };
        self.release_source_lock(&key, key_lock);
        result
    }

    fn update_serialized(&self, key: SourceKey, raw: &str) -> Result<SourceUpdate> {
        self.ensure_open()?;

        let definitions = self.parser.parse(&key, raw).inspect_err(|e| {
            warn!(source = %key, error = %e, "Source rejected, keeping previous resources");
        })?;
        let built = self.builder.build(&key, definitions).inspect_err(|e| {
            warn!(source = %key, error = %e, "Source rejected, keeping previous resources");
        })?;

        self.install(key, Some(built))
    }

    /// Drop a source and close its instances
    ///
    /// Returns `None` when the key is unknown.
    pub fn remove_source(&self, key: &SourceKey) -> Result<Option<SourceUpdate>> {
        let key_lock = self.source_lock(key);
        let result = {
            let _serialized = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.remove_serialized(key)
        };
        self.release_source_lock(key, key_lock);
        result
    }

    fn remove_serialized(&self, key: &SourceKey) -> Result<Option<SourceUpdate>> {
        self.ensure_open()?;

        if !self.lock_state().sources.contains_key(key) {
            debug!(source = %key, "Ignoring removal of unknown source");
            return Ok(None);
        }
        self.install(key.clone(), None).map(Some)
    }

    /// Look up a published resource
    pub fn get(&self, name: &str) -> Option<Arc<dyn Resource>> {
        self.current.load().get(name)
    }

    /// Look up a published resource as a concrete type
    pub fn get_as<T: Resource>(&self, name: &str) -> Result<Arc<T>> {
        self.current.load().get_as::<T>(name)
    }

    /// Names in the current snapshot
    pub fn list_names(&self) -> BTreeSet<String> {
        self.current.load().names()
    }

    /// Names in the current snapshot with their type tags
    pub fn list(&self) -> BTreeMap<String, String> {
        self.current.load().list()
    }

    /// Detailed listing of the current snapshot
    pub fn resources(&self) -> Vec<ResourceInfo> {
        self.current.load().resources()
    }

    /// Keys of the sources behind the current snapshot
    pub fn source_keys(&self) -> Vec<SourceKey> {
        self.current.load().source_keys().to_vec()
    }

    /// Pin the current snapshot for several consistent lookups
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Fill `consumer`'s declared slots from the current snapshot
    pub fn inject<C: Injectable>(&self, consumer: &mut C) -> InjectionReport {
        self.injector.inject(&self.current.load(), consumer)
    }

    /// Handle that resolves `name` on every access
    pub fn handle<N: Into<String>>(&self, name: N) -> ResourceHandle {
        ResourceHandle::new(name.into(), Arc::clone(&self.current))
    }

    /// Remove every source, publish an empty snapshot and close all instances
    ///
    /// Idempotent; later updates fail with [`Error::RegistryClosed`]. Returns
    /// the number of instances closed by this call.
    pub fn close(&self) -> usize {
        let sources = {
            let mut state = self.lock_state();
            if state.closed {
                return 0;
            }
            state.closed = true;
            state.generation += 1;
            let sources = mem::take(&mut state.sources);
            self.current.store(Arc::new(Snapshot::fold(state.generation, &state.sources)));
            sources
        };

        let displaced: Vec<_> = sources
            .values()
            .flat_map(|map| self.lifecycle.supersede_displaced(map, None))
            .collect();
        let closed = self.lifecycle.close_all(displaced);
        info!(closed, "Resource registry closed");
        closed
    }

    /// Whether [`Self::close`] has run
    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    fn install(&self, key: SourceKey, replacement: Option<SourceMap>) -> Result<SourceUpdate> {
        let (update, displaced) = {
            let mut state = self.lock_state();
            if state.closed {
                drop(state);
                if let Some(map) = replacement {
                    self.lifecycle.rollback(map.into_values());
                }
                return Err(Error::RegistryClosed);
            }

            let previous = match replacement {
                Some(map) => {
                    for resource in map.values() {
                        resource.publish();
                    }
                    state.sources.insert(key.clone(), map)
                }
                None => state.sources.remove(&key),
            };

            state.generation += 1;
            let snapshot = Snapshot::fold(state.generation, &state.sources);
            self.current.store(Arc::new(snapshot));

            let current = state.sources.get(&key);
            let displaced = previous
                .as_ref()
                .map(|old| self.lifecycle.supersede_displaced(old, current))
                .unwrap_or_default();
            let update = SourceUpdate {
                key,
                generation: state.generation,
                resources: current.map(|map| map.keys().cloned().collect()).unwrap_or_default(),
                closed: 0,
            };
            (update, displaced)
        };

        let closed = self.lifecycle.close_all(displaced);
        info!(
            source = %update.key,
            generation = update.generation,
            resources = update.resources.len(),
            closed,
            "Published resource snapshot"
        );
        Ok(SourceUpdate { closed, ..update })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.lock_state().closed {
            Err(Error::RegistryClosed)
        } else {
            Ok(())
        }
    }

    fn source_lock(&self, key: &SourceKey) -> Arc<Mutex<()>> {
        Arc::clone(self.source_locks.entry(key.clone()).or_default().value())
    }

    /// Forget a writer lock nobody else holds or waits on
    ///
    /// `source_lock` clones under the same shard lock `remove_if` takes, so a
    /// writer either sees the old mutex while it is still mapped or a new one.
    fn release_source_lock(&self, key: &SourceKey, key_lock: Arc<Mutex<()>>) {
        drop(key_lock);
        self.source_locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    fn lock_state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SourceListener for ResourceRegistry {
    fn on_source_changed(&self, key: SourceKey, raw_content: &str) -> Result<()> {
        self.update_source(key, raw_content).map(|_| ())
    }

    fn on_source_removed(&self, key: &SourceKey) -> Result<()> {
        self.remove_source(key).map(|_| ())
    }
}

impl Drop for ResourceRegistry {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("ResourceRegistry")
            .field("generation", &snapshot.generation())
            .field("sources", &snapshot.source_keys())
            .field("resources", &snapshot.len())
            .finish_non_exhaustive()
    }
}
