//! Transcript aggregate

use super::error::TranscriptError;
use super::snapshot::TranscriptSnapshot;
use super::turn::{Turn, TurnId, TurnStatus};
use crate::config::SourcePolicy;
use crate::stream::fragment::Fragment;

/// Result of applying one fragment to a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentApplied {
    /// The turn that received the text.
    pub turn: TurnId,
    /// True when this fragment moved the turn from `Pending` to `Streaming`.
    pub first_fragment: bool,
}

/// Ordered pairing of user turns to bot turns (Aggregate)
///
/// Grows monotonically: turns are never removed or reordered. At most one
/// turn is open (`Pending` or `Streaming`) and it is always the last one,
/// because appending a turn completes the previously open one.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new `Pending` turn and return its id.
    ///
    /// Any turn still open is marked `Complete` first; a submission is never
    /// skipped because the previous response is unfinished.
    pub fn append_turn(&mut self, user_text: impl Into<String>) -> TurnId {
        self.complete_open_turn();
        self.turns.push(Turn::new(user_text));
        TurnId::new(self.turns.len() - 1)
    }

    /// Append fragment text to the given turn.
    pub fn append_to_turn(
        &mut self,
        id: TurnId,
        fragment: &Fragment,
        policy: SourcePolicy,
    ) -> Result<FragmentApplied, TranscriptError> {
        let turn = self
            .turns
            .get_mut(id.index())
            .ok_or(TranscriptError::UnknownTurn(id))?;

        if !turn.is_open() {
            return Err(TranscriptError::TurnComplete(id));
        }

        turn.push_bot_text(fragment.text());
        let source = policy.resolve(turn.bot_source(), fragment.source()).to_string();
        turn.set_bot_source(&source);

        let first_fragment = turn.status() == TurnStatus::Pending;
        if first_fragment {
            turn.set_status(TurnStatus::Streaming);
        }

        Ok(FragmentApplied {
            turn: id,
            first_fragment,
        })
    }

    /// Append fragment text to the last turn, whatever its position.
    pub fn append_to_last_bot_text(
        &mut self,
        fragment: &Fragment,
        policy: SourcePolicy,
    ) -> Result<FragmentApplied, TranscriptError> {
        let last = self.last_id().ok_or(TranscriptError::Empty)?;
        self.append_to_turn(last, fragment, policy)
    }

    /// Mark the open turn (if any) as `Complete` and return its id.
    pub fn complete_open_turn(&mut self) -> Option<TurnId> {
        let id = self.open_turn()?;
        self.turns[id.index()].set_status(TurnStatus::Complete);
        Some(id)
    }

    /// The turn still accepting fragments, if any.
    pub fn open_turn(&self) -> Option<TurnId> {
        self.last_id()
            .filter(|id| self.turns[id.index()].is_open())
    }

    pub fn get(&self, id: TurnId) -> Option<&Turn> {
        self.turns.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot::new(&self.turns)
    }

    fn last_id(&self) -> Option<TurnId> {
        self.turns.len().checked_sub(1).map(TurnId::new)
    }
}
