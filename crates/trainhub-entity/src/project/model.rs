//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use trainhub_core::AppError;

/// A project that training data is attached to.
///
/// The name is the project's identity; uploads reference it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the project was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Unique project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Check that a project name can be used as a single folder segment.
///
/// Project names become both a folder node name and a directory under
/// the private root, so separators and dot segments are refused.
pub fn validate_project_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Project name cannot be empty"));
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(AppError::validation(format!(
            "Project name '{name}' cannot be used as a folder name"
        )));
    }
    Ok(())
}
