//! Storage Config

use std::path::PathBuf;

use clap::Args;
use storefront::storage::{FileStore, StorageError};

/// Durable storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the stored cart and session token
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Opens the store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(&self) -> Result<FileStore, StorageError> {
        FileStore::open(self.data_dir.clone())
    }
}
