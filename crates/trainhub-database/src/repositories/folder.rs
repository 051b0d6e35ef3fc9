//! Folder node repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use trainhub_core::error::{AppError, ErrorKind};
use trainhub_core::result::AppResult;
use trainhub_entity::folder::{CreateFolderNode, FolderNode};

/// Name of the unique index over `(parent, name)`.
const PARENT_NAME_KEY: &str = "folder_nodes_parent_name_key";

/// Repository for folder node lookups and inserts.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by name under a parent (`None` = Home).
    pub async fn find_by_name(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<FolderNode>> {
        sqlx::query_as::<_, FolderNode>(
            "SELECT * FROM folder_nodes WHERE name = $1 AND parent_id IS NOT DISTINCT FROM $2",
        )
        .bind(name)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List direct children of a folder.
    pub async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<FolderNode>> {
        sqlx::query_as::<_, FolderNode>(
            "SELECT * FROM folder_nodes WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// Create a new folder. Runs on the pool, outside any ingest
    /// transaction, so the row is committed on return.
    pub async fn create(&self, data: &CreateFolderNode) -> AppResult<FolderNode> {
        sqlx::query_as::<_, FolderNode>(
            "INSERT INTO folder_nodes (name, parent_id, is_private, project) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.is_private)
        .bind(&data.project)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PARENT_NAME_KEY) => {
                AppError::conflict(format!("Folder '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }
}
