use std::path::PathBuf;

use serde::Deserialize;

/// Blob storage configuration shared by every component that touches file content.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory of the content-addressed store. Default: "./data/blobs".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Largest accepted blob in bytes. Default: 128 MiB.
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/blobs")
}
fn default_max_blob_size() -> u64 {
    128 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_blob_size: default_max_blob_size(),
        }
    }
}
