//! Typed upload requests.

use serde::{Deserialize, Serialize};
use validator::Validate;

use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;

/// Message returned when an entry lacks its image or label.
pub const MISSING_FIELDS_MESSAGE: &str = "Invalid training data format: Missing image or label.";

/// A full upload: labelled images plus an optional model artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingUpload {
    /// Name of an existing project.
    pub project_name: String,
    /// Labelled images in submission order.
    #[serde(default)]
    pub training_data: Vec<TrainingEntry>,
    /// Optional trained model.
    #[serde(default)]
    pub model_file: Option<ModelUpload>,
}

impl TrainingUpload {
    /// Reject the request if any entry is missing its image or label.
    ///
    /// Runs before any folder or file is touched.
    pub fn validate_shape(&self) -> AppResult<()> {
        for (index, entry) in self.training_data.iter().enumerate() {
            entry.validate().map_err(|e| {
                tracing::debug!(index, errors = %e, "Rejected training entry");
                AppError::validation(MISSING_FIELDS_MESSAGE)
            })?;
        }
        Ok(())
    }

    /// The model upload, if both of its fields are non-empty.
    pub fn effective_model(&self) -> Option<&ModelUpload> {
        self.model_file.as_ref().filter(|m| m.is_present())
    }
}

/// One labelled image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TrainingEntry {
    /// Base64 payload, optionally with a data-URL prefix.
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub image: Option<String>,
    /// `ok` or `defective`, case-insensitive. Other labels are skipped.
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub label: Option<String>,
}

impl TrainingEntry {
    /// Build an entry from an image payload and a label.
    pub fn new(image: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            label: Some(label.into()),
        }
    }
}

/// A trained model artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelUpload {
    /// Base64 payload, optionally with a data-URL prefix.
    #[serde(default)]
    pub file_data: Option<String>,
    /// Name the client gave the model.
    #[serde(default)]
    pub file_name: Option<String>,
}

impl ModelUpload {
    /// Build a model upload from a payload and a client-side name.
    pub fn new(file_data: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_data: Some(file_data.into()),
            file_name: Some(file_name.into()),
        }
    }

    /// Whether both the payload and the name are non-empty.
    pub fn is_present(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.file_data) && filled(&self.file_name)
    }
}
