//! Project domain entities.

pub mod model;

pub use model::{CreateProject, Project, validate_project_name};
