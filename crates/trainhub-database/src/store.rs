//! Document store traits.
//!
//! The upload workflow only talks to the store through these traits, so
//! it can run against PostgreSQL in production and the in-memory store
//! in tests.

use async_trait::async_trait;
use uuid::Uuid;

use trainhub_core::result::AppResult;
use trainhub_entity::{
    CreateFileRecord, CreateFolderNode, CreateProject, FileRecord, FolderNode, Project,
};

/// Durable storage for projects, folder nodes and file records.
///
/// Operations on this trait are auto-committed. File records are only
/// written through a [`StoreTransaction`] obtained from [`begin`].
///
/// [`begin`]: DocumentStore::begin
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "postgres", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Whether a project with this name exists.
    async fn project_exists(&self, name: &str) -> AppResult<bool>;

    /// Register a new project. Fails with a conflict if the name is taken.
    async fn create_project(&self, data: &CreateProject) -> AppResult<Project>;

    /// List all projects ordered by name.
    async fn list_projects(&self) -> AppResult<Vec<Project>>;

    /// Find the folder named `name` directly under `parent_id`
    /// (`None` = Home).
    async fn find_folder(&self, name: &str, parent_id: Option<Uuid>)
    -> AppResult<Option<FolderNode>>;

    /// Create a folder node. The insert is durable when this returns.
    ///
    /// Fails with a conflict if a folder with the same `(parent, name)`
    /// already exists.
    async fn create_folder(&self, data: &CreateFolderNode) -> AppResult<FolderNode>;

    /// List the direct children of `parent_id` ordered by name.
    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<FolderNode>>;

    /// List committed file records of a project, oldest first.
    async fn list_files(&self, project: &str) -> AppResult<Vec<FileRecord>>;

    /// Open a unit of work for file records.
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>>;
}

/// A unit of work over file records.
///
/// Records inserted through the transaction become visible only after
/// [`commit`](StoreTransaction::commit). Dropping a transaction without
/// committing discards its records.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Insert a file record.
    async fn insert_file(&mut self, data: &CreateFileRecord) -> AppResult<FileRecord>;

    /// Make all inserted records durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard all inserted records.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
