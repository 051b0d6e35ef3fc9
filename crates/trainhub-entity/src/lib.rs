//! # trainhub-entity
//!
//! Domain entity models for TrainHub. Every struct in this crate
//! represents a store row or a domain value object. Database entities
//! derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod project;

pub use file::{CreateFileRecord, FileLabel, FileRecord};
pub use folder::{CreateFolderNode, FolderNode, HOME_FOLDER};
pub use project::{CreateProject, Project, validate_project_name};
