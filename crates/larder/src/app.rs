//! Application wiring shared by the binary and its tests

use anyhow::{Context, Result};
use larder_domain::SourceListener;
use larder_infrastructure::{AppConfig, ResourceRegistry, SourceDirectory, SourceWatcher};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// A started registry plus the configuration it was opened with
#[derive(Debug)]
pub struct App {
    registry: Arc<ResourceRegistry>,
    config: AppConfig,
}

impl App {
    /// Validate `config`, build the registry and load every source under the
    /// configured directory
    ///
    /// Sources that fail to load are logged and skipped.
    pub fn open(config: AppConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let registry = Arc::new(ResourceRegistry::from_config(&config.registry));

        let sources = match &config.registry.sources_dir {
            Some(dir) => SourceDirectory::new(dir)
                .read_sources()
                .with_context(|| format!("Cannot read sources from {}", dir.display()))?,
            None => {
                warn!("No sources directory configured; registry starts empty");
                Vec::new()
            }
        };

        let report = registry.start(sources).context("Cannot start registry")?;
        for (key, error) in &report.failed {
            warn!(source = %key, error = %error, "Source rejected at startup");
        }

        Ok(Self { registry, config })
    }

    /// The running registry
    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// Whether [`Self::serve`] keeps reloading sources until shutdown
    pub fn is_watching(&self) -> bool {
        self.config.registry.watch
    }

    /// Close the registry, first watching the sources directory until
    /// `shutdown` resolves when watching is enabled
    ///
    /// Returns the number of instances closed.
    pub async fn serve<F>(self, shutdown: F) -> Result<usize>
    where
        F: Future<Output = ()>,
    {
        let watched = if self.is_watching() {
            self.config.registry.sources_dir.as_deref()
        } else {
            None
        };
        if let Some(dir) = watched {
            let watcher = SourceWatcher::start(
                dir,
                Arc::clone(&self.registry) as Arc<dyn SourceListener>,
                self.config.registry.reload_delay(),
            )
            .context("Cannot start source watcher")?;

            shutdown.await;
            drop(watcher);
        }

        let closed = self.registry.close();
        info!(closed, "Registry closed");
        Ok(closed)
    }
}
