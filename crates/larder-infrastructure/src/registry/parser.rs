//! Definition Parser
//!
//! Turns the raw content of one source into resource definitions. The syntax
//! follows the source key's extension; the logical shape is the same for both:
//!
//! ```text
//! { "resources": { "<name>": { "type": "<tag>", "<param>": <value>, ... }, ... } }
//! ```
//!
//! A blank document, a missing `resources` key or `resources: null` define no
//! resources. Anything else that does not fit the shape is a parse error and
//! the caller keeps its last good state.

use larder_domain::constants::{RESOURCES_KEY, TYPE_KEY};
use larder_domain::error::{Error, Result};
use larder_domain::value_objects::json_kind;
use larder_domain::{Parameters, ResourceDefinition, SourceFormat, SourceKey};
use serde_json::Value;

/// Parser for source documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionParser;

impl DefinitionParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a source using the format implied by its key
    pub fn parse(&self, key: &SourceKey, raw: &str) -> Result<Vec<ResourceDefinition>> {
        self.parse_as(key, raw, key.format())
    }

    /// Parse a source with an explicit format
    ///
    /// Definitions come back in document order, which is also build order.
    pub fn parse_as(
        &self,
        key: &SourceKey,
        raw: &str,
        format: SourceFormat,
    ) -> Result<Vec<ResourceDefinition>> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document = match format {
            SourceFormat::Json => serde_json::from_str::<Value>(raw).map_err(|e| {
                Error::parse_with_source(key.as_str(), "invalid JSON document", e)
            })?,
            SourceFormat::Toml => toml::from_str::<Value>(raw).map_err(|e| {
                Error::parse_with_source(key.as_str(), "invalid TOML document", e)
            })?,
        };

        let collection = match document {
            Value::Object(mut root) => root.remove(RESOURCES_KEY),
            Value::Null => None,
            other => {
                return Err(Error::parse(
                    key.as_str(),
                    format!("document root must be a table, found {}", json_kind(&other)),
                ));
            }
        };

        let entries = match collection {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(Error::parse(
                    key.as_str(),
                    format!("'{RESOURCES_KEY}' must be a table, found {}", json_kind(&other)),
                ));
            }
        };

        entries
            .into_iter()
            .map(|(name, entry)| parse_entry(key, name, entry))
            .collect()
    }
}

fn parse_entry(key: &SourceKey, name: String, entry: Value) -> Result<ResourceDefinition> {
    if name.trim().is_empty() {
        return Err(Error::parse(key.as_str(), "resource names cannot be empty"));
    }

    let mut fields = match entry {
        Value::Object(fields) => fields,
        other => {
            return Err(Error::parse(
                key.as_str(),
                format!("resource '{name}' must be a table, found {}", json_kind(&other)),
            ));
        }
    };

    let type_tag = match fields.remove(TYPE_KEY) {
        Some(Value::String(tag)) if !tag.trim().is_empty() => tag,
        Some(Value::String(_)) => {
            return Err(Error::parse(
                key.as_str(),
                format!("resource '{name}' has an empty '{TYPE_KEY}'"),
            ));
        }
        Some(other) => {
            return Err(Error::parse(
                key.as_str(),
                format!(
                    "resource '{name}': '{TYPE_KEY}' must be a string, found {}",
                    json_kind(&other)
                ),
            ));
        }
        None => {
            return Err(Error::parse(
                key.as_str(),
                format!("resource '{name}' is missing its '{TYPE_KEY}'"),
            ));
        }
    };

    Ok(ResourceDefinition::new(
        name,
        type_tag,
        Parameters::from(fields),
    ))
}
