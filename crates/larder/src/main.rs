//! Larder - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `larder list` | Print the published resources, then watch if `registry.watch` is set |
//! | `larder types` | Print the registered resource kinds |
//! | `larder watch` | Same as `list` without printing, with watching forced on |

// Force-link larder-providers so its linkme registrations are included
extern crate larder_providers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use larder::app::App;
use larder_infrastructure::logging::init_logging;
use larder_infrastructure::{ConfigLoader, ResourceFactory};
use std::path::PathBuf;

/// Command line interface for Larder
#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(about = "Larder - hot-reloading resource registry")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of resource sources, overriding the configuration
    #[arg(short, long)]
    pub sources: Option<PathBuf>,

    /// Data directory, overriding the configuration
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the published resources
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the registered resource kinds
    Types,
    /// Reload sources on change until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("Cannot load configuration")?;
    if let Some(dir) = cli.sources {
        config.registry.sources_dir = Some(dir);
    }
    if let Some(dir) = cli.data_dir {
        config.registry.data_dir = dir;
    }
    if matches!(cli.command, Command::Watch) {
        config.registry.watch = true;
    }

    init_logging(&config.logging).context("Cannot initialize logging")?;

    match cli.command {
        Command::Types => {
            for (tag, description) in ResourceFactory::with_builtin().list_types() {
                println!("{tag:<12} {description}");
            }
        }
        Command::List { json } => {
            let app = App::open(config)?;
            let resources = app.registry().resources();
            if json {
                println!("{}", serde_json::to_string_pretty(&resources)?);
            } else {
                for info in resources {
                    println!("{:<24} {:<12} {}", info.name, info.type_tag, info.source);
                }
            }
            app.serve(ctrl_c()).await?;
        }
        Command::Watch => {
            App::open(config)?.serve(ctrl_c()).await?;
        }
    }

    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl-C");
    }
}
