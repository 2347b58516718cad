//! Manage files use case.
//!
//! Backs the file panel: list, upload and delete knowledge files. After a
//! successful upload or delete the listing is fetched again so the panel
//! always shows what the backend holds.

use crate::ports::file_store::{FileAck, FileStoreError, FileStorePort};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a mutating file operation plus the refreshed listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    pub ack: FileAck,
    pub files: Vec<String>,
}

/// Use case for the file-management panel.
#[derive(Clone)]
pub struct ManageFilesUseCase {
    store: Arc<dyn FileStorePort>,
}

impl ManageFilesUseCase {
    pub fn new(store: Arc<dyn FileStorePort>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<String>, FileStoreError> {
        let files = self.store.list().await?;
        debug!("Listed {} files", files.len());
        Ok(files)
    }

    /// Upload a local file, then refresh the listing.
    pub async fn upload(&self, path: &Path) -> Result<FileChange, FileStoreError> {
        let ack = self.store.upload(path).await?;
        info!("Uploaded {}", path.display());
        let files = self.store.list().await?;
        Ok(FileChange { ack, files })
    }

    /// Delete a stored file, then refresh the listing.
    pub async fn delete(&self, filename: &str) -> Result<FileChange, FileStoreError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(FileStoreError::EmptyFilename);
        }
        let ack = self.store.delete(filename).await?;
        info!("Deleted {}", filename);
        let files = self.store.list().await?;
        Ok(FileChange { ack, files })
    }
}
