//! Store manager that dispatches to the configured document store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use trainhub_core::config::DatabaseConfig;
use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_entity::{CreateFolderNode, CreateProject, FileRecord, FolderNode, Project};

use crate::store::{DocumentStore, StoreTransaction};

/// Wraps the document store selected by `database.provider`.
#[derive(Debug, Clone)]
pub struct StoreManager {
    inner: Arc<dyn DocumentStore>,
}

impl StoreManager {
    /// Connect to the configured store.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn DocumentStore> = match config.provider.as_str() {
            #[cfg(feature = "postgres")]
            "postgres" => {
                info!("Initializing PostgreSQL document store");
                let db = crate::connection::DatabasePool::connect(config).await?;
                Arc::new(crate::postgres::PgDocumentStore::new(db))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory document store");
                Arc::new(crate::memory::MemoryDocumentStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown document store provider: '{other}'. Supported: postgres, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { inner: store }
    }

    /// Get a shared handle to the inner store.
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl DocumentStore for StoreManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn project_exists(&self, name: &str) -> AppResult<bool> {
        self.inner.project_exists(name).await
    }

    async fn create_project(&self, data: &CreateProject) -> AppResult<Project> {
        self.inner.create_project(data).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.inner.list_projects().await
    }

    async fn find_folder(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<FolderNode>> {
        self.inner.find_folder(name, parent_id).await
    }

    async fn create_folder(&self, data: &CreateFolderNode) -> AppResult<FolderNode> {
        self.inner.create_folder(data).await
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<FolderNode>> {
        self.inner.find_children(parent_id).await
    }

    async fn list_files(&self, project: &str) -> AppResult<Vec<FileRecord>> {
        self.inner.list_files(project).await
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        self.inner.begin().await
    }
}
