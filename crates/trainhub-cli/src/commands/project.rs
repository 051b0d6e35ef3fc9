//! Project management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use trainhub_core::config::AppConfig;
use trainhub_core::error::AppError;
use trainhub_service::ProjectService;

/// Arguments for project commands
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Register a project
    Add {
        /// Project name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all projects
    List,
    /// List the files uploaded for a project
    Files {
        /// Project name
        name: String,
    },
}

/// Project display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    /// Name
    name: String,
    /// Description
    description: String,
    /// Created at
    created_at: String,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Record ID
    id: String,
    /// Label
    label: String,
    /// File name
    file_name: String,
    /// Original name
    original_name: String,
    /// Size in bytes
    size: i64,
    /// URL
    url: String,
}

/// Execute project commands
pub async fn execute(
    args: &ProjectArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = ProjectService::new(super::open_store(config).await?);

    match &args.command {
        ProjectCommand::Add { name, description } => {
            let project = service.create_project(name, description.clone()).await?;
            output::print_success(&format!("Project '{}' registered.", project.name));
        }
        ProjectCommand::List => {
            let rows: Vec<ProjectRow> = service
                .list_projects()
                .await?
                .into_iter()
                .map(|p| ProjectRow {
                    name: p.name,
                    description: p.description.unwrap_or_default(),
                    created_at: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        ProjectCommand::Files { name } => {
            let rows: Vec<FileRow> = service
                .list_files(name)
                .await?
                .into_iter()
                .map(|f| FileRow {
                    id: f.id.to_string(),
                    label: f.label.to_string(),
                    file_name: f.file_name,
                    original_name: f.original_name.unwrap_or_default(),
                    size: f.file_size,
                    url: f.file_url,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
