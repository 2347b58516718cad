//! Configuration file loading for streamchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `STREAMCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./streamchat.toml` or `./.streamchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/streamchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileChatConfig, FileConfig, FileLoggingConfig,
};
pub use loader::{ConfigLoader, ConfigSources, ENV_PREFIX};
