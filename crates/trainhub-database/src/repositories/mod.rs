//! PostgreSQL repository implementations for TrainHub entities.

pub mod file;
pub mod folder;
pub mod project;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use project::ProjectRepository;
