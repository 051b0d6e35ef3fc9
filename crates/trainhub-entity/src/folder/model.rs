//! Folder node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Name of the implicit root every folder hierarchy hangs from.
pub const HOME_FOLDER: &str = "Home";

/// A logical folder in the file browser hierarchy.
///
/// `(parent_id, name)` is unique; a `None` parent means the folder sits
/// directly under [`HOME_FOLDER`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FolderNode {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name (one path segment).
    pub name: String,
    /// Parent folder ID (null for folders under Home).
    pub parent_id: Option<Uuid>,
    /// Whether the folder lives in the private tree.
    pub is_private: bool,
    /// The project this folder was created for.
    pub project: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl FolderNode {
    /// Check if this folder hangs directly from Home.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderNode {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for Home).
    pub parent_id: Option<Uuid>,
    /// Whether the folder is private.
    pub is_private: bool,
    /// Owning project.
    pub project: String,
}
