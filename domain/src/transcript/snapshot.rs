//! Render-ready, immutable copy of the transcript

use super::turn::{Turn, TurnStatus};
use serde::Serialize;

/// Immutable view of the transcript at one point in time.
///
/// Owns its turns, so it never observes later appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptSnapshot {
    turns: Vec<Turn>,
}

impl TranscriptSnapshot {
    pub(crate) fn new(turns: &[Turn]) -> Self {
        Self {
            turns: turns.to_vec(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// True while the latest turn has not received its first fragment.
    ///
    /// This is the loading-indicator flag: it clears on the first fragment,
    /// not on the end of the response (the protocol has no end marker).
    pub fn awaiting_response(&self) -> bool {
        self.last()
            .is_some_and(|turn| turn.status() == TurnStatus::Pending)
    }
}
