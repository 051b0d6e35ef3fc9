//! Training-data intake: folder provisioning, file ingestion and the
//! transactional upload workflow.

pub mod ingestor;
pub mod naming;
pub mod provisioner;
pub mod request;
pub mod response;
pub mod service;

pub use ingestor::FileIngestor;
pub use provisioner::{FolderHandle, FolderParent, FolderProvisioner, ProjectFolders};
pub use request::{ModelUpload, TrainingEntry, TrainingUpload};
pub use response::{ModelFileInfo, UploadSummary, UploadedFile};
pub use service::TrainingDataService;
