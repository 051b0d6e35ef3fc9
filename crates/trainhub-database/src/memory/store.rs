//! In-memory document store backed by a shared map.
//!
//! Mirrors the PostgreSQL semantics that the workflow relies on: unique
//! `(parent, name)` folders, auto-committed folder inserts and
//! transactional file records.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_entity::{
    CreateFileRecord, CreateFolderNode, CreateProject, FileRecord, FolderNode, Project,
};

use crate::store::{DocumentStore, StoreTransaction};

#[derive(Debug, Default)]
struct MemoryState {
    /// Projects keyed by name.
    projects: BTreeMap<String, Project>,
    /// Folders keyed by `(parent, name)`.
    folders: HashMap<(Option<Uuid>, String), FolderNode>,
    /// Committed file records in insertion order.
    files: Vec<FileRecord>,
}

/// Document store that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of folder nodes, across all parents.
    pub async fn folder_count(&self) -> usize {
        self.state.read().await.folders.len()
    }

    /// Total number of committed file records.
    pub async fn file_count(&self) -> usize {
        self.state.read().await.files.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn project_exists(&self, name: &str) -> AppResult<bool> {
        Ok(self.state.read().await.projects.contains_key(name))
    }

    async fn create_project(&self, data: &CreateProject) -> AppResult<Project> {
        let mut state = self.state.write().await;
        if state.projects.contains_key(&data.name) {
            return Err(AppError::conflict(format!(
                "Project '{}' already exists",
                data.name
            )));
        }
        let project = Project {
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: Utc::now(),
        };
        state.projects.insert(project.name.clone(), project.clone());
        Ok(project)
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.state.read().await.projects.values().cloned().collect())
    }

    async fn find_folder(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Option<FolderNode>> {
        let state = self.state.read().await;
        Ok(state.folders.get(&(parent_id, name.to_string())).cloned())
    }

    async fn create_folder(&self, data: &CreateFolderNode) -> AppResult<FolderNode> {
        let mut state = self.state.write().await;
        let key = (data.parent_id, data.name.clone());
        if state.folders.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "Folder '{}' already exists",
                data.name
            )));
        }
        if let Some(parent_id) = data.parent_id {
            if !state.folders.values().any(|f| f.id == parent_id) {
                return Err(AppError::not_found(format!(
                    "Parent folder {parent_id} not found"
                )));
            }
        }
        let folder = FolderNode {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            is_private: data.is_private,
            project: data.project.clone(),
            created_at: Utc::now(),
        };
        state.folders.insert(key, folder.clone());
        Ok(folder)
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<FolderNode>> {
        let state = self.state.read().await;
        let mut children: Vec<FolderNode> = state
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn list_files(&self, project: &str) -> AppResult<Vec<FileRecord>> {
        let state = self.state.read().await;
        Ok(state
            .files
            .iter()
            .filter(|f| f.project == project)
            .cloned()
            .collect())
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        }))
    }
}

/// Buffers inserted records until commit.
struct MemoryTransaction {
    state: Arc<RwLock<MemoryState>>,
    pending: Vec<FileRecord>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert_file(&mut self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        {
            let state = self.state.read().await;
            if !state.folders.values().any(|f| f.id == data.folder_id) {
                return Err(AppError::not_found(format!(
                    "Folder {} not found",
                    data.folder_id
                )));
            }
        }
        let record = FileRecord {
            id: Uuid::new_v4(),
            file_name: data.file_name.clone(),
            original_name: data.original_name.clone(),
            label: data.label,
            folder_id: data.folder_id,
            project: data.project.clone(),
            file_size: data.file_size,
            content_hash: data.content_hash.clone(),
            file_url: data.file_url.clone(),
            is_private: data.is_private,
            created_at: Utc::now(),
        };
        self.pending.push(record.clone());
        Ok(record)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let count = self.pending.len();
        self.state.write().await.files.extend(self.pending);
        debug!(records = count, "Committed in-memory transaction");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        debug!(
            records = self.pending.len(),
            "Rolled back in-memory transaction"
        );
        Ok(())
    }
}
