//! Transcript domain.
//!
//! - [`turn::Turn`]: one user utterance paired with its bot response
//! - [`entities::Transcript`]: ordered, append-only sequence of turns
//! - [`snapshot::TranscriptSnapshot`]: immutable copy handed to renderers

pub mod entities;
pub mod error;
pub mod snapshot;
pub mod turn;
