//! Source Builder
//!
//! Builds every instance a source defines, all-or-nothing. On the first
//! failure the instances already built in this attempt are rolled back and the
//! error is returned; nothing the registry currently publishes is touched.

use super::factory::ResourceFactory;
use super::lifecycle::LifecycleManager;
use super::managed::ManagedResource;
use larder_domain::error::{Error, Result};
use larder_domain::{ResourceContext, ResourceDefinition, SourceKey};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Instances contributed by one source, keyed by resource name
pub type SourceMap = BTreeMap<String, Arc<ManagedResource>>;

/// Builds complete source maps from definitions
#[derive(Debug, Clone)]
pub struct SourceBuilder {
    factory: Arc<ResourceFactory>,
    data_dir: PathBuf,
    lifecycle: LifecycleManager,
}

impl SourceBuilder {
    /// Create a builder constructing through `factory`
    pub fn new(factory: Arc<ResourceFactory>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            factory,
            data_dir: data_dir.into(),
            lifecycle: LifecycleManager::new(),
        }
    }

    /// Data directory handed to every constructor
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Build one instance per definition, or none at all
    pub fn build(
        &self,
        key: &SourceKey,
        definitions: Vec<ResourceDefinition>,
    ) -> Result<SourceMap> {
        let mut built: Vec<Arc<ManagedResource>> = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if built.iter().any(|resource| resource.name() == definition.name) {
                let error = Error::invalid_argument(format!(
                    "resource '{}' is defined twice in source {key}",
                    definition.name
                ));
                self.abort(key, built, &error);
                return Err(error);
            }

            let context = ResourceContext::new(&self.data_dir, key.clone(), &definition.name);
            match self.factory.build(&definition, &context) {
                Ok(instance) => {
                    debug!(
                        source = %key,
                        resource = %definition.name,
                        type_tag = %definition.type_tag,
                        "Resource initialized"
                    );
                    built.push(Arc::new(ManagedResource::new(&definition, key.clone(), instance)));
                }
                Err(error) => {
                    self.abort(key, built, &error);
                    return Err(error);
                }
            }
        }

        Ok(built
            .into_iter()
            .map(|resource| (resource.name().to_string(), resource))
            .collect())
    }

    fn abort(&self, key: &SourceKey, built: Vec<Arc<ManagedResource>>, error: &Error) {
        warn!(
            source = %key,
            built = built.len(),
            error = %error,
            "Source build failed, rolling back"
        );
        self.lifecycle.rollback(built.into_iter().rev());
    }
}
