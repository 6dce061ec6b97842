//! # Larder - Built-in Resource Kinds
//!
//! Each kind implements [`larder_domain::Resource`] and registers itself in
//! [`larder_domain::RESOURCE_TYPES`] at link time, so a factory built with
//! `ResourceFactory::with_builtin()` knows it without further wiring.
//!
//! | Type tag | Resource | Backed by |
//! |----------|----------|-----------|
//! | `properties` | [`PropertiesResource`] | `serde_json` |
//! | `markdown` | [`MarkdownRenderer`] | `pulldown-cmark` |
//! | `handlebars` | [`TemplateEngine`] | `handlebars` |
//!
//! Binaries that only reach kinds through the factory must still link this
//! crate:
//!
//! ```ignore
//! extern crate larder_providers;
//! ```

pub use larder_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Static key/value resources
pub mod properties;

/// Markdown to HTML rendering
pub mod markdown;

/// Handlebars template engine
pub mod templates;

pub use templates::TemplateEngine;
pub use markdown::MarkdownRenderer;
pub use properties::PropertiesResource;
