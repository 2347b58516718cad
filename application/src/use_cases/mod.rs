//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod accumulator;
pub mod chat_session;
pub mod manage_files;
pub mod transcript_store;
pub mod turn_controller;
