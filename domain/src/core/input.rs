//! User input value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user utterance that passed submission validation (Value Object)
///
/// The raw text is kept exactly as typed: it is what gets stored in the
/// transcript and what goes over the wire. Only the emptiness check looks
/// at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    raw: String,
}

impl UserInput {
    /// Try to create a new input, returning None if it is blank
    pub fn try_new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self { raw })
        }
    }

    /// Get the raw text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consume and return the raw text
    pub fn into_raw(self) -> String {
        self.raw
    }
}

impl TryFrom<&str> for UserInput {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        UserInput::try_new(s).ok_or(DomainError::EmptyInput)
    }
}

impl TryFrom<String> for UserInput {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        UserInput::try_new(s).ok_or(DomainError::EmptyInput)
    }
}

impl std::fmt::Display for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
