//! Core domain concepts shared across all subdomains.
//!
//! - [`input::UserInput`]: a validated, non-blank user utterance
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod input;
