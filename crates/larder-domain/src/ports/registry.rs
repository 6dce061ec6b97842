//! Resource Kind Registry
//!
//! Defines the auto-registration slice for resource kinds.
//! Uses the `linkme` crate so a kind registers itself next to its
//! implementation instead of being compiled into a closed list.
//!
//! ## Registration Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  1. Kind defines:     #[linkme::distributed_slice(RESOURCE_TYPES)]│
//! │                       static ENTRY: ResourceTypeEntry = ...      │
//! │                              ↓                                   │
//! │  2. Factory seeds:    RESOURCE_TYPES.iter()                      │
//! │                              ↓                                   │
//! │  3. Source selects:   { "type": "markdown", ... }                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Registering a kind
//!
//! ```ignore
//! use larder_domain::ports::registry::{ResourceTypeEntry, RESOURCE_TYPES};
//!
//! #[linkme::distributed_slice(RESOURCE_TYPES)]
//! static MARKDOWN: ResourceTypeEntry = ResourceTypeEntry {
//!     name: "markdown",
//!     description: "Markdown to HTML renderer",
//!     factory: |definition, ctx| {
//!         Ok(Arc::new(MarkdownRenderer::from_parameters(&definition.parameters, ctx)?))
//!     },
//! };
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::ports::resource::{Resource, ResourceContext};
use crate::value_objects::ResourceDefinition;

/// Constructor signature of a statically registered resource kind
pub type ResourceConstructor =
    fn(&ResourceDefinition, &ResourceContext) -> Result<Arc<dyn Resource>>;

/// Registry entry for a resource kind
pub struct ResourceTypeEntry {
    /// Type tag matched against a definition's `type`
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Constructor
    pub factory: ResourceConstructor,
}

// Auto-collection via linkme distributed slices - kinds submit entries at link time
#[linkme::distributed_slice]
pub static RESOURCE_TYPES: [ResourceTypeEntry] = [..];

/// List all statically registered resource kinds
///
/// Returns `(tag, description)` pairs in link order.
pub fn list_resource_types() -> Vec<(&'static str, &'static str)> {
    RESOURCE_TYPES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
