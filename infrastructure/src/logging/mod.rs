//! Conversation logging
//!
//! [`JsonlConversationLogger`] writes the chat core's observability events
//! (submitted turns, dropped sends, orphan and malformed fragments,
//! connection lifecycle) as JSON lines.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
