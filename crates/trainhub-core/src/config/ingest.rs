//! Training-data ingestion configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the upload workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Remove files written by a failed upload after the store rollback.
    #[serde(default = "default_true")]
    pub cleanup_on_failure: bool,
    /// Length of the random suffix in image file names.
    #[serde(default = "default_image_suffix_len")]
    pub image_suffix_len: usize,
    /// Length of the random suffix in model file names.
    #[serde(default = "default_model_suffix_len")]
    pub model_suffix_len: usize,
    /// Length of the random content fingerprint stored on each record.
    #[serde(default = "default_fingerprint_len")]
    pub fingerprint_len: usize,
    /// Prefix of the file-browser link returned as `folder_path`.
    #[serde(default = "default_browser_prefix")]
    pub browser_prefix: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            cleanup_on_failure: default_true(),
            image_suffix_len: default_image_suffix_len(),
            model_suffix_len: default_model_suffix_len(),
            fingerprint_len: default_fingerprint_len(),
            browser_prefix: default_browser_prefix(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_image_suffix_len() -> usize {
    6
}

fn default_model_suffix_len() -> usize {
    8
}

fn default_fingerprint_len() -> usize {
    10
}

fn default_browser_prefix() -> String {
    "/app/file".to_string()
}
