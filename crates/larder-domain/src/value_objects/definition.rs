//! Resource definitions
//!
//! A definition is the parsed, immutable description of one named resource:
//! its type tag and an arbitrary nested parameter map. Definitions are consumed
//! by the source builder and discarded once the instance exists.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed description of one named resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource name, unique within its source
    pub name: String,
    /// Tag selecting the constructor in the resource factory
    pub type_tag: String,
    /// Constructor parameters (everything but the type tag)
    pub parameters: Parameters,
}

impl ResourceDefinition {
    /// Create a definition
    pub fn new<N: Into<String>, T: Into<String>>(
        name: N,
        type_tag: T,
        parameters: Parameters,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            parameters,
        }
    }
}

/// Arbitrary nested parameter map of a resource definition
///
/// # Example
///
/// ```
/// use larder_domain::Parameters;
/// use serde_json::json;
///
/// let params = Parameters::from_value(json!({ "url": "ldap://localhost", "port": 389 })).unwrap();
/// assert_eq!(params.get_str("url"), Some("ldap://localhost"));
/// assert_eq!(params.get_u64("port"), Some(389));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    /// Empty parameter map
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::invalid_argument(format!(
                "parameters must be a table, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Add a parameter
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String parameter
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean parameter
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Unsigned integer parameter
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    /// Signed integer parameter
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Nested table parameter
    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// String parameter that must be present
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::invalid_argument(format!(
                "parameter '{key}' must be a string, found {}",
                json_kind(other)
            ))),
            None => Err(Error::invalid_argument(format!(
                "missing required parameter '{key}'"
            ))),
        }
    }

    /// Deserialize the whole map into a typed settings struct
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            Error::invalid_argument(format!("invalid parameters: {e}"))
        })
    }

    /// Whether a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in document order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Human-readable kind of a JSON value, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
