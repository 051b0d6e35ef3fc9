//! Upload result summary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trainhub_entity::FileLabel;

/// Returned after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Human-readable outcome.
    pub message: String,
    /// Every stored file, images first, then the model if any.
    pub files: Vec<UploadedFile>,
    /// Project the files were stored for.
    pub project: String,
    /// Number of stored files, including the model.
    pub count: usize,
    /// File-browser link to the project folder.
    pub folder_path: String,
    /// The stored model, if one was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_file: Option<ModelFileInfo>,
}

/// One stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Generated file name.
    pub name: String,
    /// Storage URL.
    pub url: String,
    /// Label the file was stored under.
    pub label: FileLabel,
    /// ID of the file record.
    pub docname: Uuid,
}

/// The stored model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFileInfo {
    /// Generated file name.
    pub name: String,
    /// Name the client gave the model.
    pub original_name: String,
    /// Storage URL.
    pub url: String,
    /// ID of the file record.
    pub docname: Uuid,
}
