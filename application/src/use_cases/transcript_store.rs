//! Transcript store
//!
//! Single source of truth for what is rendered. Wraps the domain
//! [`Transcript`] with the configured [`SourcePolicy`] and reports dropped
//! fragments to the conversation log.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use std::sync::Arc;
use streamchat_domain::{
    Fragment, FragmentApplied, SourcePolicy, Transcript, TranscriptError, TranscriptSnapshot,
    TurnId,
};
use tracing::{debug, warn};

/// Owns the transcript for one mounted chat view.
///
/// Mutated only by the turn controller (on submit) and the streaming
/// accumulator (on fragment). Readers get snapshots.
pub struct TranscriptStore {
    transcript: Transcript,
    source_policy: SourcePolicy,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl TranscriptStore {
    pub fn new(source_policy: SourcePolicy) -> Self {
        Self {
            transcript: Transcript::new(),
            source_policy,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Append a `Pending` turn for a submitted utterance.
    pub fn append_turn(&mut self, user_text: &str) -> TurnId {
        if let Some(completed) = self.transcript.complete_open_turn() {
            debug!("Turn {} completed by new submission", completed);
        }
        let id = self.transcript.append_turn(user_text);
        debug!("Turn {} appended ({} bytes)", id, user_text.len());
        id
    }

    /// Append fragment text to the last turn.
    ///
    /// No-op when the transcript is empty; the fragment is dropped and an
    /// `orphan_fragment` event is logged.
    pub fn append_to_last_bot_text(&mut self, fragment: &Fragment) -> Option<FragmentApplied> {
        match self
            .transcript
            .append_to_last_bot_text(fragment, self.source_policy)
        {
            Ok(applied) => Some(applied),
            Err(e) => {
                self.report_dropped(fragment, &e);
                None
            }
        }
    }

    /// Append fragment text to a specific turn.
    pub fn append_to_turn(
        &mut self,
        id: TurnId,
        fragment: &Fragment,
    ) -> Result<FragmentApplied, TranscriptError> {
        self.transcript
            .append_to_turn(id, fragment, self.source_policy)
            .inspect_err(|e| self.report_dropped(fragment, e))
    }

    /// Mark the open turn as complete (no more fragments can reach it).
    pub fn complete_open_turn(&mut self) -> Option<TurnId> {
        self.transcript.complete_open_turn()
    }

    pub fn open_turn(&self) -> Option<TurnId> {
        self.transcript.open_turn()
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        self.transcript.snapshot()
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn source_policy(&self) -> SourcePolicy {
        self.source_policy
    }

    fn report_dropped(&self, fragment: &Fragment, error: &TranscriptError) {
        warn!("Dropping fragment ({} bytes): {}", fragment.text().len(), error);
        self.conversation_logger.log(ConversationEvent::new(
            "orphan_fragment",
            serde_json::json!({
                "reason": error.to_string(),
                "bytes": fragment.text().len(),
                "source": fragment.source(),
            }),
        ));
    }
}
