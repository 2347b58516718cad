//! Infrastructure layer for streamchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod chat;
pub mod config;
pub mod files;
pub mod logging;

// Re-export commonly used types
pub use chat::{DecodeError, FragmentDecoder, WsChatTransport};
pub use config::{
    ConfigLoader, ConfigSources, ConfigValidationError, FileBackendConfig, FileChatConfig,
    FileConfig, FileLoggingConfig,
};
pub use files::HttpFileStore;
pub use logging::JsonlConversationLogger;
