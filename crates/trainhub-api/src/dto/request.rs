//! Request DTOs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use trainhub_core::error::AppError;
use trainhub_core::result::AppResult;
use trainhub_service::training::{ModelUpload, TrainingEntry, TrainingUpload};

/// Body of `POST /api/method/upload_training_data`.
///
/// `training_data` and `model_file` arrive either as JSON values or as
/// strings holding JSON, depending on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTrainingDataRequest {
    /// Name of an existing project.
    pub project_name: String,
    /// Array of `{image, label}` entries, or a string encoding one.
    #[serde(default)]
    pub training_data: Value,
    /// `{file_data, file_name}`, a string encoding one, or null.
    #[serde(default)]
    pub model_file: Value,
}

impl UploadTrainingDataRequest {
    /// Decode into a typed upload.
    pub fn into_upload(self) -> AppResult<TrainingUpload> {
        let training_data =
            decode_field::<Vec<TrainingEntry>>(self.training_data, "training_data")?.ok_or_else(
                || AppError::validation("Invalid training data format: training_data is required"),
            )?;
        let model_file = decode_field::<ModelUpload>(self.model_file, "model_file")?;

        Ok(TrainingUpload {
            project_name: self.project_name,
            training_data,
            model_file,
        })
    }
}

/// Decode a field that may be a JSON value or a string holding JSON.
/// Null and empty strings decode to `None`.
fn decode_field<T: DeserializeOwned>(value: Value, field: &str) -> AppResult<Option<T>> {
    let value = match value {
        Value::String(raw) if raw.trim().is_empty() => return Ok(None),
        Value::String(raw) => serde_json::from_str(&raw).map_err(|e| {
            AppError::validation(format!("Invalid {field}: not valid JSON ({e})"))
        })?,
        other => other,
    };
    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| AppError::validation(format!("Invalid training data format: {field}: {e}")))
}
