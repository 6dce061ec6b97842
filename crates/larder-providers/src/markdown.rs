//! Markdown renderer resource
//!
//! Converts CommonMark to HTML with pulldown-cmark. Extensions are switched
//! on per definition:
//!
//! | Parameter | Extension |
//! |-----------|-----------|
//! | `tables` | GitHub tables |
//! | `footnotes` | Footnotes |
//! | `strikethrough` | `~~strike~~` |
//! | `tasklists` | `- [x] done` |
//! | `smart_punctuation` | Curly quotes, dashes |
//! | `heading_attributes` | `# Title {#id .class}` |
//!
//! Relative paths given to [`MarkdownRenderer::render_file`] resolve against
//! the registry's data directory.

use crate::constants::MARKDOWN_TYPE;
use larder_domain::error::{Error, Result};
use larder_domain::ports::{RESOURCE_TYPES, ResourceTypeEntry};
use larder_domain::{Parameters, Resource, ResourceContext};
use pulldown_cmark::{Options, Parser, html};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extension switches, all off by default
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub smart_punctuation: bool,
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    fn to_parser_options(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options.set(Options::ENABLE_HEADING_ATTRIBUTES, self.heading_attributes);
        options
    }
}

/// Markdown to HTML converter
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
    data_dir: PathBuf,
}

impl MarkdownRenderer {
    /// Create a renderer
    pub fn new(options: MarkdownOptions, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            options,
            data_dir: data_dir.into(),
        }
    }

    /// Create a renderer from definition parameters
    pub fn from_parameters(parameters: &Parameters, context: &ResourceContext) -> Result<Self> {
        let options = parameters.deserialize::<MarkdownOptions>()?;
        Ok(Self::new(options, &context.data_dir))
    }

    /// Enabled extensions
    pub fn options(&self) -> MarkdownOptions {
        self.options
    }

    /// Render Markdown text to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options.to_parser_options());
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }

    /// Read and render a Markdown file
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        };
        let markdown = std::fs::read_to_string(&full_path).map_err(|e| {
            Error::io_with_source(format!("Cannot read {}", full_path.display()), e)
        })?;
        Ok(self.render(&markdown))
    }
}

impl Resource for MarkdownRenderer {}

#[linkme::distributed_slice(RESOURCE_TYPES)]
static MARKDOWN_RESOURCE: ResourceTypeEntry = ResourceTypeEntry {
    name: MARKDOWN_TYPE,
    description: "Markdown to HTML renderer (pulldown-cmark)",
    factory: |definition, context| {
        Ok(Arc::new(MarkdownRenderer::from_parameters(
            &definition.parameters,
            context,
        )?))
    },
};
