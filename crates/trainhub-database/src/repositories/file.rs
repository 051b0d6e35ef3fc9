//! File record repository implementation.

use sqlx::{PgConnection, PgPool};

use trainhub_core::error::{AppError, ErrorKind};
use trainhub_core::result::AppResult;
use trainhub_entity::file::{CreateFileRecord, FileRecord};

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record on the given connection, typically an open
    /// transaction.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateFileRecord,
    ) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO file_records \
             (file_name, original_name, label, folder_id, project, file_size, \
              content_hash, file_url, is_private) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.file_name)
        .bind(&data.original_name)
        .bind(data.label)
        .bind(data.folder_id)
        .bind(&data.project)
        .bind(data.file_size)
        .bind(&data.content_hash)
        .bind(&data.file_url)
        .bind(data.is_private)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))
    }

    /// List committed records of a project.
    pub async fn find_by_project(&self, project: &str) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM file_records WHERE project = $1 ORDER BY created_at ASC, file_name ASC",
        )
        .bind(project)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }
}
