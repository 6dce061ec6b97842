//! Provider constants

/// Type tag of [`crate::PropertiesResource`]
pub const PROPERTIES_TYPE: &str = "properties";

/// Type tag of [`crate::MarkdownRenderer`]
pub const MARKDOWN_TYPE: &str = "markdown";

/// Type tag of [`crate::TemplateEngine`]
pub const HANDLEBARS_TYPE: &str = "handlebars";

/// File extension of templates loaded from a directory
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "hbs";
