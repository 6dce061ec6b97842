//! Properties resource
//!
//! The simplest kind: every parameter of the definition becomes a property.
//!
//! ```json
//! { "resources": { "site": { "type": "properties", "title": "Docs", "port": 8080 } } }
//! ```

use crate::constants::PROPERTIES_TYPE;
use larder_domain::error::{Error, Result};
use larder_domain::ports::{RESOURCE_TYPES, ResourceTypeEntry};
use larder_domain::{Parameters, Resource};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Read-only key/value map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesResource {
    values: Map<String, Value>,
}

impl PropertiesResource {
    /// Take every parameter as a property
    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self {
            values: parameters.as_map().clone(),
        }
    }

    /// Raw property value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String property
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Deserialize one property into `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| Error::not_found(format!("property '{key}'")))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Property names, in definition order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no properties
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Resource for PropertiesResource {}

#[linkme::distributed_slice(RESOURCE_TYPES)]
static PROPERTIES_RESOURCE: ResourceTypeEntry = ResourceTypeEntry {
    name: PROPERTIES_TYPE,
    description: "Static key/value properties",
    factory: |definition, _context| {
        Ok(Arc::new(PropertiesResource::from_parameters(
            &definition.parameters,
        )))
    },
};
