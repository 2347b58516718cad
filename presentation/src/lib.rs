//! Presentation layer for streamchat
//!
//! This crate contains CLI definitions, output formatters, the waiting
//! spinner and the interactive chat view.

pub mod chat;
pub mod cli;
pub mod files;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatView, ConsoleSurface, ReplCommand, ReplInput};
pub use cli::commands::Cli;
pub use files::FilePanel;
pub use output::console::ConsoleFormatter;
pub use progress::ResponseSpinner;
