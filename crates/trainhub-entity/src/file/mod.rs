//! Ingested file entities.

pub mod label;
pub mod model;

pub use label::FileLabel;
pub use model::{CreateFileRecord, FileRecord};
