//! Folder domain entities.

pub mod model;

pub use model::{CreateFolderNode, FolderNode, HOME_FOLDER};
