//! Turn entity: one user utterance paired with its bot response

use serde::{Deserialize, Serialize};

/// Position of a turn in the transcript.
///
/// Ids are handed out in insertion order and never reused, so an id stays
/// valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(usize);

impl TurnId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Progress of the bot side of a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    /// Submitted, no fragment received yet (drives the loading indicator).
    #[default]
    Pending,
    /// At least one fragment applied, more may follow.
    Streaming,
    /// No further fragments will be applied.
    Complete,
}

impl TurnStatus {
    pub fn is_open(&self) -> bool {
        !matches!(self, TurnStatus::Complete)
    }
}

/// One exchange unit (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user_text: String,
    bot_text: String,
    bot_source: String,
    status: TurnStatus,
}

impl Turn {
    pub(crate) fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: String::new(),
            bot_source: String::new(),
            status: TurnStatus::Pending,
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn bot_text(&self) -> &str {
        &self.bot_text
    }

    /// Source tag of the bot response; empty when none has been received.
    pub fn bot_source(&self) -> &str {
        &self.bot_source
    }

    pub fn status(&self) -> TurnStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub(crate) fn push_bot_text(&mut self, text: &str) {
        self.bot_text.push_str(text);
    }

    pub(crate) fn set_bot_source(&mut self, source: &str) {
        if self.bot_source != source {
            self.bot_source = source.to_string();
        }
    }

    pub(crate) fn set_status(&mut self, status: TurnStatus) {
        self.status = status;
    }
}
