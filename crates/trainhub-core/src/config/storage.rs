//! Private file storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for ingested files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of the private files tree. Folder paths such as
    /// `Home/training_data/<project>/ok` are resolved below it.
    #[serde(default = "default_private_root")]
    pub private_root: String,
    /// URL prefix under which private files are addressed.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            private_root: default_private_root(),
            url_prefix: default_url_prefix(),
        }
    }
}

fn default_private_root() -> String {
    "./data/private/files".to_string()
}

fn default_url_prefix() -> String {
    "/private/files".to_string()
}
