//! Label attached to every ingested file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trainhub_core::AppError;

/// Classification of an ingested file.
///
/// Images are labeled `ok` or `defective`; the trained model artifact is
/// stored under the `model` label. The label doubles as the leaf folder
/// name under the project folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_label", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileLabel {
    /// A good sample.
    Ok,
    /// A defective sample.
    Defective,
    /// A trained model artifact.
    Model,
}

impl FileLabel {
    /// All labels, in the order their folders are provisioned.
    pub const ALL: [FileLabel; 3] = [Self::Ok, Self::Defective, Self::Model];

    /// Interpret a caller-supplied image label, case-insensitively.
    ///
    /// Returns `None` for anything other than `ok` or `defective`; such
    /// images are skipped by the ingestor rather than rejected.
    pub fn from_image_label(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "ok" => Some(Self::Ok),
            "defective" => Some(Self::Defective),
            _ => None,
        }
    }

    /// Return the label as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Defective => "defective",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "defective" => Ok(Self::Defective),
            "model" => Ok(Self::Model),
            _ => Err(AppError::validation(format!(
                "Invalid file label: '{s}'. Expected one of: ok, defective, model"
            ))),
        }
    }
}
