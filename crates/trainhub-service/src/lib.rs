//! # trainhub-service
//!
//! Business logic service layer for TrainHub. The training-data upload
//! workflow lives in [`training`]: the [`FolderProvisioner`] lays out the
//! folder hierarchy, the [`FileIngestor`] writes and records each file,
//! and [`TrainingDataService`] runs both inside one store transaction.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod project;
pub mod training;

pub use project::ProjectService;
pub use training::{
    FileIngestor, FolderProvisioner, TrainingDataService, TrainingEntry, TrainingUpload,
    UploadSummary,
};
