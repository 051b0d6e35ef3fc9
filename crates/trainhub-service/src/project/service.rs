//! Project registration and listing.

use std::sync::Arc;

use tracing::info;

use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_database::DocumentStore;
use trainhub_entity::{CreateProject, FileRecord, Project, validate_project_name};

/// Manages the projects uploads are filed under.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Document store.
    store: Arc<dyn DocumentStore>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register a project.
    pub async fn create_project(
        &self,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Project> {
        let name = name.trim();
        validate_project_name(name)?;

        let project = self
            .store
            .create_project(&CreateProject {
                name: name.to_string(),
                description,
            })
            .await?;

        info!(project = %project.name, "Project registered");
        Ok(project)
    }

    /// List all projects.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.store.list_projects().await
    }

    /// List the committed files of a project.
    pub async fn list_files(&self, project: &str) -> AppResult<Vec<FileRecord>> {
        if !self.store.project_exists(project).await? {
            return Err(AppError::not_found(format!(
                "Project '{project}' does not exist."
            )));
        }
        self.store.list_files(project).await
    }
}
