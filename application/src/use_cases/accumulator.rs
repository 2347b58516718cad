//! Streaming accumulator
//!
//! Routes inbound fragments to the turn that is still receiving a response.
//! The target is tracked explicitly instead of being inferred from the
//! position of the last turn.

use super::transcript_store::TranscriptStore;
use streamchat_domain::{Fragment, FragmentApplied, TranscriptError, TurnId};
use tracing::{debug, trace};

/// What happened to one inbound fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulateOutcome {
    /// The fragment was appended to the open turn.
    Applied(FragmentApplied),
    /// No turn was open; the fragment was dropped.
    Orphaned,
    /// The store refused the fragment (the target was already complete).
    Rejected(TranscriptError),
}

impl AccumulateOutcome {
    /// Whether the transcript changed and needs a redraw.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Tracks the turn currently receiving fragments.
#[derive(Debug, Default)]
pub struct StreamingAccumulator {
    open_turn: Option<TurnId>,
}

impl StreamingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the accumulator at a freshly submitted turn.
    pub fn track(&mut self, turn: TurnId) {
        if let Some(previous) = self.open_turn.replace(turn) {
            debug!("Accumulator retargeted {} -> {}", previous, turn);
        }
    }

    /// Stop routing fragments (transport closed or view unmounted).
    pub fn release(&mut self) -> Option<TurnId> {
        self.open_turn.take()
    }

    pub fn open_turn(&self) -> Option<TurnId> {
        self.open_turn
    }

    /// Apply one fragment to the open turn.
    pub fn apply(&mut self, store: &mut TranscriptStore, fragment: &Fragment) -> AccumulateOutcome {
        let Some(turn) = self.open_turn else {
            debug!(
                "Orphan fragment dropped ({} bytes, no open turn)",
                fragment.text().len()
            );
            return AccumulateOutcome::Orphaned;
        };

        match store.append_to_turn(turn, fragment) {
            Ok(applied) => {
                trace!(
                    "Fragment applied to {} ({} bytes, first={})",
                    turn,
                    fragment.text().len(),
                    applied.first_fragment
                );
                AccumulateOutcome::Applied(applied)
            }
            Err(e) => {
                // The turn can no longer receive text; stop targeting it.
                self.open_turn = None;
                AccumulateOutcome::Rejected(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamchat_domain::{SourcePolicy, TurnStatus};

    #[test]
    fn test_fragment_without_open_turn_is_orphaned() {
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let mut accumulator = StreamingAccumulator::new();

        let outcome = accumulator.apply(&mut store, &Fragment::new("Hello", "kb"));

        assert_eq!(outcome, AccumulateOutcome::Orphaned);
        assert!(!outcome.changed());
        assert!(store.is_empty());
    }

    #[test]
    fn test_fragments_concatenate_into_tracked_turn() {
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let mut accumulator = StreamingAccumulator::new();
        let id = store.append_turn("hi");
        accumulator.track(id);

        let first = accumulator.apply(&mut store, &Fragment::text_only("Hel"));
        let second = accumulator.apply(&mut store, &Fragment::text_only("lo"));

        assert_eq!(
            first,
            AccumulateOutcome::Applied(FragmentApplied {
                turn: id,
                first_fragment: true
            })
        );
        assert_eq!(
            second,
            AccumulateOutcome::Applied(FragmentApplied {
                turn: id,
                first_fragment: false
            })
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot.turns()[0].bot_text(), "Hello");
        assert_eq!(snapshot.turns()[0].status(), TurnStatus::Streaming);
    }

    #[test]
    fn test_release_stops_routing() {
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let mut accumulator = StreamingAccumulator::new();
        let id = store.append_turn("hi");
        accumulator.track(id);

        assert_eq!(accumulator.release(), Some(id));
        let outcome = accumulator.apply(&mut store, &Fragment::text_only("late"));

        assert_eq!(outcome, AccumulateOutcome::Orphaned);
        assert_eq!(store.snapshot().turns()[0].bot_text(), "");
    }

    #[test]
    fn test_stale_target_is_rejected_and_cleared() {
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let mut accumulator = StreamingAccumulator::new();
        let id = store.append_turn("hi");
        accumulator.track(id);
        store.complete_open_turn();

        let outcome = accumulator.apply(&mut store, &Fragment::text_only("late"));

        assert_eq!(outcome, AccumulateOutcome::Rejected(TranscriptError::TurnComplete(id)));
        assert_eq!(accumulator.open_turn(), None);
    }

    #[test]
    fn test_track_retargets_to_newest_turn() {
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let mut accumulator = StreamingAccumulator::new();
        let first = store.append_turn("one");
        accumulator.track(first);
        let second = store.append_turn("two");
        accumulator.track(second);

        accumulator.apply(&mut store, &Fragment::text_only("reply"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.turns()[0].bot_text(), "");
        assert_eq!(snapshot.turns()[1].bot_text(), "reply");
    }
}
