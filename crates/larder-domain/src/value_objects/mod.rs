//! Value objects
//!
//! Immutable data describing where resources come from and how they are configured.

pub mod definition;
pub mod source;

pub use definition::{Parameters, ResourceDefinition, json_kind};
pub use source::{SourceFormat, SourceKey};
