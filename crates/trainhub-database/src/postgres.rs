//! PostgreSQL-backed [`DocumentStore`].

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use trainhub_core::error::{AppError, ErrorKind};
use trainhub_core::result::AppResult;
use trainhub_entity::{
    CreateFileRecord, CreateFolderNode, CreateProject, FileRecord, FolderNode, Project,
};

use crate::connection::DatabasePool;
use crate::repositories::{FileRepository, FolderRepository, ProjectRepository};
use crate::store::{DocumentStore, StoreTransaction};

/// Document store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    db: DatabasePool,
    projects: ProjectRepository,
    folders: FolderRepository,
    files: FileRepository,
}

impl PgDocumentStore {
    /// Build the store and its repositories on top of a connected pool.
    pub fn new(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            projects: ProjectRepository::new(pool.clone()),
            folders: FolderRepository::new(pool.clone()),
            files: FileRepository::new(pool),
            db,
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    async fn project_exists(&self, name: &str) -> AppResult<bool> {
        self.projects.exists(name).await
    }

    async fn create_project(&self, data: &CreateProject) -> AppResult<Project> {
        self.projects.create(data).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.projects.find_all().await
    }

    async fn find_folder(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<FolderNode>> {
        self.folders.find_by_name(name, parent_id).await
    }

    async fn create_folder(&self, data: &CreateFolderNode) -> AppResult<FolderNode> {
        self.folders.create(data).await
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<FolderNode>> {
        self.folders.find_children(parent_id).await
    }

    async fn list_files(&self, project: &str) -> AppResult<Vec<FileRecord>> {
        self.files.find_by_project(project).await
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let tx = self.db.pool().begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        debug!("Opened ingest transaction");
        Ok(Box::new(PgStoreTransaction {
            tx,
            files: self.files.clone(),
        }))
    }
}

/// An open PostgreSQL transaction. sqlx rolls it back on drop.
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
    files: FileRepository,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn insert_file(&mut self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        self.files.insert(&mut *self.tx, data).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}
