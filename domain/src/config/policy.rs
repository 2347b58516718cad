//! Behavior policies selected by configuration

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How a fragment's source tag updates the turn's recorded source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePolicy {
    /// A non-empty source overwrites; an empty one keeps the previous value.
    #[default]
    KeepOnEmpty,
    /// Every fragment overwrites the source, even with an empty value.
    Overwrite,
}

impl SourcePolicy {
    /// Resolve the source a turn should hold after a fragment arrives.
    pub fn resolve<'a>(&self, current: &'a str, incoming: &'a str) -> &'a str {
        match self {
            SourcePolicy::KeepOnEmpty if incoming.is_empty() => current,
            _ => incoming,
        }
    }
}

impl std::str::FromStr for SourcePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep_on_empty" | "keep" => Ok(SourcePolicy::KeepOnEmpty),
            "overwrite" => Ok(SourcePolicy::Overwrite),
            other => Err(DomainError::UnknownPolicy(other.to_string())),
        }
    }
}

/// What happens when the user submits blank input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySubmissionPolicy {
    /// Silently drop the submission.
    #[default]
    Ignore,
    /// Surface a blocking validation message to the user.
    Alert,
}

impl std::str::FromStr for EmptySubmissionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(EmptySubmissionPolicy::Ignore),
            "alert" => Ok(EmptySubmissionPolicy::Alert),
            other => Err(DomainError::UnknownPolicy(other.to_string())),
        }
    }
}
