//! Storage backend selection

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which persistence backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single-device backend backed by JSON files on disk
    Local,
    /// Multi-user backend backed by PostgreSQL
    Postgres,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Local
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Data directory for the local backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::Local && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_DATA_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".roteiro")
}
