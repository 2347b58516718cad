//! Domain layer for streamchat
//!
//! This crate contains the transcript model and the streaming vocabulary.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn
//!
//! One user utterance paired with the bot response streamed back for it.
//! A turn goes `Pending → Streaming` on its first fragment and becomes
//! `Complete` only implicitly, when the next turn is appended or the
//! connection closes. The backend never signals the end of a response.
//!
//! ## Fragment
//!
//! One inbound piece of a bot response: text plus an optional source tag.
//! Fragments are appended to the open turn and then discarded.

pub mod config;
pub mod core;
pub mod stream;
pub mod transcript;

// Re-export commonly used types
pub use config::{EmptySubmissionPolicy, SourcePolicy};
pub use core::{error::DomainError, input::UserInput};
pub use stream::{connection::ConnectionState, fragment::Fragment, protocol::ProtocolVariant};
pub use transcript::{
    entities::{FragmentApplied, Transcript},
    error::TranscriptError,
    snapshot::TranscriptSnapshot,
    turn::{Turn, TurnId, TurnStatus},
};
