//! # Larder Domain
//!
//! Core types shared by every layer of the resource registry.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`value_objects`] | Source keys, resource definitions and their parameters |
//! | [`ports`] | Resource contract, kind registration slice, injection descriptors |
//! | [`constants`] | Source document keys and extensions |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    Binding, Injectable, InjectionReport, RESOURCE_TYPES, Resource, ResourceConstructor,
    ResourceContext, ResourceState, ResourceTypeEntry, SourceListener,
};
pub use value_objects::{Parameters, ResourceDefinition, SourceFormat, SourceKey};
