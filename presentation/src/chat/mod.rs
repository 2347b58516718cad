//! Interactive chat module
//!
//! Console chat view: slash commands, a streaming surface and the
//! event loop tying them to a [`ChatSession`](streamchat_application::ChatSession).

mod commands;
mod console_surface;
mod view;

pub use commands::{ReplCommand, ReplInput};
pub use console_surface::ConsoleSurface;
pub use view::ChatView;
