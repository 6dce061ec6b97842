//! Handlebars template engine resource
//!
//! Templates come inline from the definition, from a directory under the
//! data directory, or both:
//!
//! ```toml
//! [resources.mail_templates]
//! type = "handlebars"
//! strict = true
//! templates_dir = "templates/mail"   # *.hbs, registered by file stem
//!
//! [resources.mail_templates.templates]
//! subject = "Welcome, {{name}}"
//! ```

use crate::constants::{DEFAULT_TEMPLATE_EXTENSION, HANDLEBARS_TYPE};
use handlebars::Handlebars;
use larder_domain::error::{Error, Result};
use larder_domain::ports::{RESOURCE_TYPES, ResourceTypeEntry};
use larder_domain::{Parameters, Resource, ResourceContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateSettings {
    strict: bool,
    dev_mode: bool,
    templates: BTreeMap<String, String>,
    templates_dir: Option<PathBuf>,
    extension: Option<String>,
}

/// Named Handlebars templates ready to render
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    /// Build the engine described by definition parameters
    pub fn from_parameters(parameters: &Parameters, context: &ResourceContext) -> Result<Self> {
        let settings = parameters.deserialize::<TemplateSettings>()?;

        let mut registry = Handlebars::new();
        registry.set_strict_mode(settings.strict);
        registry.set_dev_mode(settings.dev_mode);

        if let Some(dir) = &settings.templates_dir {
            let extension = settings
                .extension
                .as_deref()
                .unwrap_or(DEFAULT_TEMPLATE_EXTENSION);
            register_directory(&mut registry, &context.resolve_path(dir), extension)?;
        }

        for (name, template) in &settings.templates {
            registry
                .register_template_string(name, template)
                .map_err(|e| Error::invalid_argument(format!("template '{name}': {e}")))?;
        }

        Ok(Self { registry })
    }

    /// Render a registered template
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.registry.has_template(name) {
            return Err(Error::not_found(format!("template '{name}'")));
        }
        self.registry
            .render(name, data)
            .map_err(|e| Error::internal(format!("Cannot render template '{name}': {e}")))
    }

    /// Render a one-off template string
    pub fn render_inline<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.registry
            .render_template(template, data)
            .map_err(|e| Error::invalid_argument(format!("Cannot render inline template: {e}")))
    }

    /// Whether a template is registered under `name`
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Registered template names, sorted
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.get_templates().keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether missing fields fail rendering
    pub fn is_strict(&self) -> bool {
        self.registry.strict_mode()
    }
}

impl Resource for TemplateEngine {}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.template_names())
            .field("strict", &self.is_strict())
            .finish()
    }
}

fn register_directory(
    registry: &mut Handlebars<'static>,
    dir: &Path,
    extension: &str,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::io(format!(
            "Template directory not found: {}",
            dir.display()
        )));
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            Error::io_with_source(format!("Cannot read template directory {}", dir.display()), e)
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        registry
            .register_template_file(name, path)
            .map_err(|e| Error::invalid_argument(format!("template '{name}': {e}")))?;
        debug!(template = name, path = %path.display(), "Registered template file");
    }
    Ok(())
}

#[linkme::distributed_slice(RESOURCE_TYPES)]
static HANDLEBARS_RESOURCE: ResourceTypeEntry = ResourceTypeEntry {
    name: HANDLEBARS_TYPE,
    description: "Handlebars template engine",
    factory: |definition, context| {
        Ok(Arc::new(TemplateEngine::from_parameters(
            &definition.parameters,
            context,
        )?))
    },
};
