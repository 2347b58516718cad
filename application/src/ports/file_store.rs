//! File store port
//!
//! Interface to the backend's knowledge-file endpoints (list, upload,
//! delete). Independent of the chat core; it only shares the backend host.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors from file store operations
#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Filename cannot be empty")]
    EmptyFilename,
}

/// Acknowledgement body returned by create/delete.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAck {
    pub body: Value,
}

impl FileAck {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Human-readable summary: the `message` field when present,
    /// otherwise the compact JSON body.
    pub fn summary(&self) -> String {
        match self.body.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => self.body.to_string(),
        }
    }
}

/// Backend file management
#[async_trait]
pub trait FileStorePort: Send + Sync {
    /// Names of all stored files.
    async fn list(&self) -> Result<Vec<String>, FileStoreError>;

    /// Upload a local file (multipart field `file`).
    async fn upload(&self, path: &Path) -> Result<FileAck, FileStoreError>;

    /// Delete a stored file by name.
    async fn delete(&self, filename: &str) -> Result<FileAck, FileStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_message_field() {
        let ack = FileAck::new(serde_json::json!({"message": "File deleted"}));
        assert_eq!(ack.summary(), "File deleted");
    }

    #[test]
    fn summary_falls_back_to_json() {
        let ack = FileAck::new(serde_json::json!({"filename": "a.pdf"}));
        assert_eq!(ack.summary(), r#"{"filename":"a.pdf"}"#);
    }
}
