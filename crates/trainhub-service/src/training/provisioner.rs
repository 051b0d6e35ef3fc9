//! Idempotent folder provisioning.
//!
//! Every project gets the same layout:
//!
//! ```text
//! Home/training_data/<project>/ok
//! Home/training_data/<project>/defective
//! Home/training_data/<project>/model
//! ```
//!
//! Folder nodes are created outside the upload transaction so they
//! survive a failed ingest. A concurrent creator losing the unique
//! `(parent, name)` race gets a conflict and re-reads the winner.

use std::sync::Arc;

use tracing::{debug, info};

use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_core::traits::storage::StorageProvider;
use trainhub_database::DocumentStore;
use trainhub_entity::{CreateFolderNode, FileLabel, FolderNode, HOME_FOLDER};

/// Top-level folder that holds every project's training data.
pub const TRAINING_DATA_FOLDER: &str = "training_data";

/// A provisioned folder node together with its path below the private root.
#[derive(Debug, Clone)]
pub struct FolderHandle {
    /// The folder node.
    pub node: FolderNode,
    /// Path relative to the private root, e.g. `Home/training_data/P1/ok`.
    pub path: String,
}

/// Where a folder is created.
#[derive(Debug, Clone, Copy)]
pub enum FolderParent<'a> {
    /// Directly under Home.
    Home,
    /// Under a folder provisioned earlier.
    Folder(&'a FolderHandle),
}

impl FolderParent<'_> {
    fn id(&self) -> Option<uuid::Uuid> {
        match self {
            Self::Home => None,
            Self::Folder(handle) => Some(handle.node.id),
        }
    }

    fn path(&self) -> &str {
        match self {
            Self::Home => HOME_FOLDER,
            Self::Folder(handle) => &handle.path,
        }
    }
}

/// The five folders of a project layout.
#[derive(Debug, Clone)]
pub struct ProjectFolders {
    /// `Home/training_data`.
    pub training_data: FolderHandle,
    /// `Home/training_data/<project>`.
    pub project: FolderHandle,
    /// Images labelled `ok`.
    pub ok: FolderHandle,
    /// Images labelled `defective`.
    pub defective: FolderHandle,
    /// Model artifacts.
    pub model: FolderHandle,
}

impl ProjectFolders {
    /// The folder files with this label go to.
    pub fn for_label(&self, label: FileLabel) -> &FolderHandle {
        match label {
            FileLabel::Ok => &self.ok,
            FileLabel::Defective => &self.defective,
            FileLabel::Model => &self.model,
        }
    }
}

/// Ensures folder nodes and their directories exist.
#[derive(Debug, Clone)]
pub struct FolderProvisioner {
    /// Document store holding folder nodes.
    store: Arc<dyn DocumentStore>,
    /// Private file storage.
    storage: Arc<dyn StorageProvider>,
}

impl FolderProvisioner {
    /// Creates a new folder provisioner.
    pub fn new(store: Arc<dyn DocumentStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { store, storage }
    }

    /// Find or create the folder `name` under `parent` and make sure its
    /// directory exists.
    pub async fn ensure_folder(
        &self,
        name: &str,
        parent: FolderParent<'_>,
        project: &str,
    ) -> AppResult<FolderHandle> {
        let parent_id = parent.id();
        let node = match self.store.find_folder(name, parent_id).await? {
            Some(node) => node,
            None => self.create_folder(name, parent_id, project).await?,
        };

        let path = format!("{}/{}", parent.path(), name);
        self.storage.create_dir(&path).await?;

        Ok(FolderHandle { node, path })
    }

    /// Ensure the full layout for `project`.
    pub async fn provision(&self, project: &str) -> AppResult<ProjectFolders> {
        let training_data = self
            .ensure_folder(TRAINING_DATA_FOLDER, FolderParent::Home, project)
            .await?;
        let project_folder = self
            .ensure_folder(project, FolderParent::Folder(&training_data), project)
            .await?;
        let parent = FolderParent::Folder(&project_folder);
        let ok = self
            .ensure_folder(FileLabel::Ok.as_str(), parent, project)
            .await?;
        let defective = self
            .ensure_folder(FileLabel::Defective.as_str(), parent, project)
            .await?;
        let model = self
            .ensure_folder(FileLabel::Model.as_str(), parent, project)
            .await?;

        debug!(project, path = %project_folder.path, "Provisioned project folders");

        Ok(ProjectFolders {
            training_data,
            project: project_folder,
            ok,
            defective,
            model,
        })
    }

    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<uuid::Uuid>,
        project: &str,
    ) -> AppResult<FolderNode> {
        let data = CreateFolderNode {
            name: name.to_string(),
            parent_id,
            is_private: true,
            project: project.to_string(),
        };

        match self.store.create_folder(&data).await {
            Ok(node) => {
                info!(folder_id = %node.id, name, project, "Created folder");
                Ok(node)
            }
            Err(e) if e.is_conflict() => {
                debug!(name, "Folder created concurrently, re-reading");
                self.store.find_folder(name, parent_id).await?.ok_or_else(|| {
                    AppError::internal(format!(
                        "Folder '{name}' reported as existing but could not be found"
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }
}
