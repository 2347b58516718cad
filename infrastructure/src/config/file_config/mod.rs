//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod chat;
mod logging;

pub use backend::FileBackendConfig;
pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("backend.base_url `{url}` is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("backend.base_url must use http or https, not `{0}`")]
    UnsupportedScheme(String),

    #[error("backend.connect_timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend location and connection settings
    pub backend: FileBackendConfig,
    /// Chat core behavior
    pub chat: FileChatConfig,
    /// Conversation logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.backend.parse_base_url()?;
        if self.backend.connect_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
