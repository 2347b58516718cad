//! File panel for the chat view
//!
//! Runs the file-management use case and turns each result into console
//! text. Failures become an error line; they never end the session.

use crate::output::console::ConsoleFormatter;
use std::path::Path;
use streamchat_application::ManageFilesUseCase;
use tracing::warn;

/// Console front end of [`ManageFilesUseCase`].
pub struct FilePanel {
    use_case: ManageFilesUseCase,
}

impl FilePanel {
    pub fn new(use_case: ManageFilesUseCase) -> Self {
        Self { use_case }
    }

    /// Current listing.
    pub async fn list(&self) -> String {
        match self.use_case.list().await {
            Ok(files) => ConsoleFormatter::format_file_list(&files),
            Err(e) => {
                warn!("Listing files failed: {}", e);
                ConsoleFormatter::format_error(&format!("Could not list files: {}", e))
            }
        }
    }

    /// Upload `path` and show the refreshed listing.
    pub async fn upload(&self, path: &Path) -> String {
        match self.use_case.upload(path).await {
            Ok(change) => ConsoleFormatter::format_file_change(&change),
            Err(e) => {
                warn!("Upload of {} failed: {}", path.display(), e);
                ConsoleFormatter::format_error(&format!("Upload failed: {}", e))
            }
        }
    }

    /// Delete `filename` and show the refreshed listing.
    pub async fn delete(&self, filename: &str) -> String {
        match self.use_case.delete(filename).await {
            Ok(change) => ConsoleFormatter::format_file_change(&change),
            Err(e) => {
                warn!("Delete of {} failed: {}", filename, e);
                ConsoleFormatter::format_error(&format!("Delete failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use streamchat_application::{FileAck, FileStoreError, FileStorePort};

    struct MemoryStore {
        files: Mutex<Vec<String>>,
        reachable: bool,
    }

    impl MemoryStore {
        fn new(files: &[&str]) -> Self {
            Self {
                files: Mutex::new(files.iter().map(|f| f.to_string()).collect()),
                reachable: true,
            }
        }

        fn unreachable() -> Self {
            Self {
                files: Mutex::new(Vec::new()),
                reachable: false,
            }
        }

        fn check(&self) -> Result<(), FileStoreError> {
            if self.reachable {
                Ok(())
            } else {
                Err(FileStoreError::Request("connection refused".into()))
            }
        }
    }

    #[async_trait]
    impl FileStorePort for MemoryStore {
        async fn list(&self) -> Result<Vec<String>, FileStoreError> {
            self.check()?;
            Ok(self.files.lock().unwrap().clone())
        }

        async fn upload(&self, path: &Path) -> Result<FileAck, FileStoreError> {
            self.check()?;
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.files.lock().unwrap().push(name);
            Ok(FileAck::new(serde_json::json!({"message": "File uploaded"})))
        }

        async fn delete(&self, filename: &str) -> Result<FileAck, FileStoreError> {
            self.check()?;
            self.files.lock().unwrap().retain(|f| f != filename);
            Ok(FileAck::new(serde_json::json!({"message": "File deleted"})))
        }
    }

    fn panel(store: MemoryStore) -> FilePanel {
        colored::control::set_override(false);
        FilePanel::new(ManageFilesUseCase::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_list() {
        let panel = panel(MemoryStore::new(&["a.pdf"]));
        assert_eq!(panel.list().await, "Files: (1)\n  * a.pdf\n");
    }

    #[tokio::test]
    async fn test_upload_shows_refreshed_listing() {
        let panel = panel(MemoryStore::new(&["a.pdf"]));
        let output = panel.upload(Path::new("/tmp/b.txt")).await;
        assert_eq!(output, "v File uploaded\nFiles: (2)\n  * a.pdf\n  * b.txt\n");
    }

    #[tokio::test]
    async fn test_delete_shows_refreshed_listing() {
        let panel = panel(MemoryStore::new(&["a.pdf"]));
        let output = panel.delete("a.pdf").await;
        assert_eq!(output, "v File deleted\n(no files uploaded)\n");
    }

    #[tokio::test]
    async fn test_failure_becomes_error_line() {
        let panel = panel(MemoryStore::unreachable());
        assert_eq!(
            panel.list().await,
            "Error: Could not list files: Request failed: connection refused"
        );
    }
}
