//! Storage provider configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded blobs and their thumbnails.
    #[serde(default = "default_folder_path")]
    pub folder_path: String,
    /// Widths of the thumbnails generated for images, largest first.
    #[serde(default = "default_thumbnail_sizes")]
    pub thumbnail_sizes: Vec<u32>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
            thumbnail_sizes: default_thumbnail_sizes(),
        }
    }
}

fn default_folder_path() -> String {
    "/tmp/files_manager".to_string()
}

fn default_thumbnail_sizes() -> Vec<u32> {
    vec![500, 250, 100]
}
