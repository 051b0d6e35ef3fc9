//! CLI command definitions and dispatch.

pub mod migrate;
pub mod project;
pub mod serve;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use trainhub_core::config::AppConfig;
use trainhub_core::error::AppError;
use trainhub_database::{DocumentStore, StoreManager};

/// TrainHub: training-data intake for inspection projects
#[derive(Debug, Parser)]
#[command(name = "trainhub", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (e.g. development, production)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the TrainHub server
    Serve,
    /// Apply database migrations
    Migrate,
    /// Project management
    Project(project::ProjectArgs),
    /// Upload a local directory of labelled images
    Upload(upload::UploadArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from_dir(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Serve => serve::execute(config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Project(args) => project::execute(args, &config, self.format).await,
            Commands::Upload(args) => upload::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: open the configured document store
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    if config.database.provider == "memory" {
        crate::output::print_warning(
            "Using the in-memory store: changes are lost when this command exits.",
        );
    }
    Ok(StoreManager::new(&config.database).await?.store())
}
