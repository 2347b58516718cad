//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Input cannot be empty")]
    EmptyInput,

    #[error("Unknown protocol variant: {0} (expected \"plain\" or \"structured\")")]
    UnknownProtocolVariant(String),

    #[error("Unknown policy value: {0}")]
    UnknownPolicy(String),
}
