//! Resource Factory
//!
//! Maps a type tag to a constructor and drives construction of one
//! definition. The table is seeded from the link-time [`RESOURCE_TYPES`]
//! slice and stays open: [`ResourceFactory::register`] adds kinds at runtime.
//!
//! Constructors may block (connections, file reads). [`ResourceFactory::build`]
//! only holds the table's read lock long enough to clone the constructor.

use super::managed::panic_message;
use larder_domain::error::{Error, Result};
use larder_domain::{RESOURCE_TYPES, Resource, ResourceContext, ResourceDefinition};
use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Shared constructor stored in the factory table
pub type Constructor =
    Arc<dyn Fn(&ResourceDefinition, &ResourceContext) -> Result<Arc<dyn Resource>> + Send + Sync>;

struct Registration {
    description: String,
    constructor: Constructor,
}

/// Type-tag dispatch table for resource construction
pub struct ResourceFactory {
    kinds: RwLock<HashMap<String, Registration>>,
}

impl ResourceFactory {
    /// Factory with no registered kinds
    pub fn empty() -> Self {
        Self {
            kinds: RwLock::new(HashMap::new()),
        }
    }

    /// Factory seeded with every kind linked into the binary
    pub fn with_builtin() -> Self {
        let factory = Self::empty();
        for entry in RESOURCE_TYPES.iter() {
            let constructor = entry.factory;
            if let Err(e) = factory.register(entry.name, entry.description, constructor) {
                warn!(
                    type_tag = entry.name,
                    error = %e,
                    "Ignoring duplicate built-in resource type"
                );
            }
        }
        factory
    }

    /// Register a constructor under a type tag
    ///
    /// Fails with [`Error::DuplicateResourceType`] when the tag is taken.
    pub fn register<T, D, F>(&self, type_tag: T, description: D, constructor: F) -> Result<()>
    where
        T: Into<String>,
        D: Into<String>,
        F: Fn(&ResourceDefinition, &ResourceContext) -> Result<Arc<dyn Resource>>
            + Send
            + Sync
            + 'static,
    {
        let type_tag = type_tag.into();
        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        if kinds.contains_key(&type_tag) {
            return Err(Error::DuplicateResourceType { type_tag });
        }
        debug!(type_tag = %type_tag, "Registered resource type");
        kinds.insert(
            type_tag,
            Registration {
                description: description.into(),
                constructor: Arc::new(constructor),
            },
        );
        Ok(())
    }

    /// Whether a constructor is registered for `type_tag`
    pub fn contains(&self, type_tag: &str) -> bool {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_tag)
    }

    /// `(tag, description)` of every registered kind, sorted by tag
    pub fn list_types(&self) -> Vec<(String, String)> {
        let kinds = self.kinds.read().unwrap_or_else(PoisonError::into_inner);
        let mut types: Vec<_> = kinds
            .iter()
            .map(|(tag, registration)| (tag.clone(), registration.description.clone()))
            .collect();
        types.sort();
        types
    }

    /// Construct the instance described by `definition`
    ///
    /// Every failure, including a panicking constructor, comes back as
    /// [`Error::Initialization`] or [`Error::UnknownResourceType`].
    pub fn build(
        &self,
        definition: &ResourceDefinition,
        context: &ResourceContext,
    ) -> Result<Arc<dyn Resource>> {
        let constructor = self.constructor(&definition.type_tag)?;

        match catch_unwind(AssertUnwindSafe(|| constructor(definition, context))) {
            Ok(Ok(instance)) => Ok(instance),
            Ok(Err(e @ Error::Initialization { .. })) => Err(e),
            Ok(Err(e)) => Err(Error::initialization_with_source(
                &definition.name,
                &definition.type_tag,
                e.to_string(),
                e,
            )),
            Err(payload) => Err(Error::initialization(
                &definition.name,
                &definition.type_tag,
                format!("constructor panicked: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    fn constructor(&self, type_tag: &str) -> Result<Constructor> {
        let kinds = self.kinds.read().unwrap_or_else(PoisonError::into_inner);
        match kinds.get(type_tag) {
            Some(registration) => Ok(Arc::clone(&registration.constructor)),
            None => {
                let mut available: Vec<String> = kinds.keys().cloned().collect();
                available.sort();
                Err(Error::UnknownResourceType {
                    type_tag: type_tag.to_string(),
                    available,
                })
            }
        }
    }
}

impl Default for ResourceFactory {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for ResourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.list_types().into_iter().map(|(tag, _)| tag).collect();
        f.debug_struct("ResourceFactory").field("types", &types).finish()
    }
}
