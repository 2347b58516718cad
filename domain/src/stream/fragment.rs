//! Inbound fragment value object

use serde::{Deserialize, Serialize};

/// One inbound piece of a bot response (Value Object)
///
/// Fragments are consumed as soon as they are applied to the transcript and
/// are never stored. An empty `source` means the fragment carries no source
/// tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    text: String,
    source: String,
}

impl Fragment {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    /// A fragment without a source tag (the plain protocol variant).
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }
}
