//! File record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::label::FileLabel;

/// Metadata record for a file written into the private tree.
///
/// Records are created once per uploaded item and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique record identifier (returned to callers as `docname`).
    pub id: Uuid,
    /// Generated file name, unique thanks to its random suffix.
    pub file_name: String,
    /// Name supplied by the uploader, kept for model artifacts only.
    pub original_name: Option<String>,
    /// The label the file was ingested under.
    pub label: FileLabel,
    /// The folder node the file belongs to.
    pub folder_id: Uuid,
    /// The owning project.
    pub project: String,
    /// Size of the written file in bytes.
    pub file_size: i64,
    /// Random per-file token. Not derived from content.
    pub content_hash: String,
    /// URL under which the file is served, e.g.
    /// `/private/files/Home/training_data/P1/ok/P1ok1_a1b2c3.png`.
    pub file_url: String,
    /// Whether the file lives in the private tree.
    pub is_private: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Generated file name.
    pub file_name: String,
    /// Uploader-supplied name (model artifacts).
    pub original_name: Option<String>,
    /// Label.
    pub label: FileLabel,
    /// Target folder.
    pub folder_id: Uuid,
    /// Owning project.
    pub project: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Random fingerprint token.
    pub content_hash: String,
    /// Served URL.
    pub file_url: String,
    /// Whether the file is private.
    pub is_private: bool,
}
