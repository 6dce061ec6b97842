//! Global snapshot
//!
//! An immutable name → instance map folded from every current source map.
//! A snapshot is built from scratch on every change and published by a
//! single pointer swap; readers hold whichever one they loaded.

use super::builder::SourceMap;
use super::managed::ManagedResource;
use larder_domain::error::{Error, Result};
use larder_domain::{Resource, ResourceState, SourceKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::warn;

/// Listing entry for one published resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    /// Resource name
    pub name: String,
    /// Type tag
    pub type_tag: String,
    /// Contributing source
    pub source: SourceKey,
    /// Lifecycle state at listing time
    pub state: ResourceState,
}

/// Immutable merged view of all sources
#[derive(Debug, Default)]
pub struct Snapshot {
    generation: u64,
    sources: Vec<SourceKey>,
    entries: HashMap<String, Arc<ManagedResource>>,
}

impl Snapshot {
    /// The empty snapshot a registry starts from
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold source maps into a new snapshot
    ///
    /// Sources are applied in ascending key order, so on a name collision the
    /// source with the greater key wins.
    pub fn fold(generation: u64, sources: &BTreeMap<SourceKey, SourceMap>) -> Self {
        let mut entries: HashMap<String, Arc<ManagedResource>> = HashMap::new();
        for (key, map) in sources {
            for (name, resource) in map {
                if let Some(shadowed) = entries.insert(name.clone(), Arc::clone(resource)) {
                    warn!(
                        resource = %name,
                        winner = %key,
                        shadowed = %shadowed.source(),
                        "Resource name defined by several sources"
                    );
                }
            }
        }
        Self {
            generation,
            sources: sources.keys().cloned().collect(),
            entries,
        }
    }

    /// Publication counter; strictly increases with every published change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Keys of the sources folded into this snapshot, in fold order
    pub fn source_keys(&self) -> &[SourceKey] {
        &self.sources
    }

    /// Look up an instance by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Resource>> {
        self.entries
            .get(name)
            .map(|resource| Arc::clone(resource.instance()))
    }

    /// Look up an instance by name and concrete type
    pub fn get_as<T: Resource>(&self, name: &str) -> Result<Arc<T>> {
        let resource = self
            .entries
            .get(name)
            .ok_or_else(|| Error::not_found(format!("resource '{name}'")))?;
        Arc::clone(resource.instance())
            .downcast_arc::<T>()
            .map_err(|_| Error::type_mismatch(name, std::any::type_name::<T>()))
    }

    /// The managed wrapper published under `name`
    pub fn entry(&self, name: &str) -> Option<&Arc<ManagedResource>> {
        self.entries.get(name)
    }

    /// Whether `name` is published
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Published names
    pub fn names(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// Published names with their type tags
    pub fn list(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(name, resource)| (name.clone(), resource.type_tag().to_string()))
            .collect()
    }

    /// Detailed listing, sorted by name
    pub fn resources(&self) -> Vec<ResourceInfo> {
        let mut infos: Vec<ResourceInfo> = self
            .entries
            .values()
            .map(|resource| ResourceInfo {
                name: resource.name().to_string(),
                type_tag: resource.type_tag().to_string(),
                source: resource.source().clone(),
                state: resource.state(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Number of published resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is published
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
