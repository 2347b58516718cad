//! Turn controller use case.
//!
//! Turns a user submission into a transcript turn plus one outbound
//! message. Blank input is rejected before anything is mutated.

use super::transcript_store::TranscriptStore;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::surface::ChatSurface;
use crate::ports::transport::{ChatTransport, SendOutcome};
use std::sync::Arc;
use streamchat_domain::{EmptySubmissionPolicy, TurnId, UserInput};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the user by a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please enter a message.")]
    EmptySubmission,
}

/// Result of a submission that was not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new turn was appended and the text handed to the transport.
    Submitted(TurnId),
    /// Blank input silently ignored.
    Ignored,
}

/// Handles user submissions.
pub struct TurnController {
    empty_submission: EmptySubmissionPolicy,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl TurnController {
    pub fn new(empty_submission: EmptySubmissionPolicy) -> Self {
        Self {
            empty_submission,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Submit one utterance.
    ///
    /// Side effects happen in a fixed order: append the turn, send the raw
    /// (untrimmed) text, clear the input, scroll to the latest turn. The turn
    /// is appended even when the connection is not open; the send is then
    /// dropped and only logged.
    pub async fn submit(
        &self,
        raw_text: &str,
        store: &mut TranscriptStore,
        transport: &dyn ChatTransport,
        surface: &mut dyn ChatSurface,
    ) -> Result<SubmitOutcome, SubmitError> {
        let Some(input) = UserInput::try_new(raw_text) else {
            debug!("Blank submission rejected ({:?})", self.empty_submission);
            return match self.empty_submission {
                EmptySubmissionPolicy::Ignore => Ok(SubmitOutcome::Ignored),
                EmptySubmissionPolicy::Alert => Err(SubmitError::EmptySubmission),
            };
        };

        let id = store.append_turn(input.raw());
        info!("Submitted turn {} ({} bytes)", id, input.raw().len());

        let outcome = transport.send(input.raw()).await;
        self.conversation_logger.log(ConversationEvent::new(
            "turn_submitted",
            serde_json::json!({
                "turn": id.index(),
                "bytes": input.raw().len(),
                "sent": outcome == SendOutcome::Sent,
            }),
        ));
        if outcome == SendOutcome::Dropped {
            warn!(
                "Message for turn {} not sent: connection is {}",
                id,
                transport.state()
            );
            self.conversation_logger.log(ConversationEvent::new(
                "send_dropped",
                serde_json::json!({
                    "turn": id.index(),
                    "state": transport.state().as_str(),
                }),
            ));
        }

        surface.clear_input();
        surface.scroll_to_latest();

        Ok(SubmitOutcome::Submitted(id))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::sync::Mutex;
    use streamchat_domain::{ConnectionState, SourcePolicy, TurnStatus};

    #[tokio::test]
    async fn test_blank_input_is_ignored_without_side_effects() {
        let controller = TurnController::new(EmptySubmissionPolicy::Ignore);
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Open);
        let mut surface = RecordingSurface::default();

        for blank in ["", "   ", "\n\t "] {
            let outcome = controller
                .submit(blank, &mut store, &transport, &mut surface)
                .await;
            assert_eq!(outcome, Ok(SubmitOutcome::Ignored));
        }

        assert!(store.is_empty());
        assert!(transport.sent().is_empty());
        assert!(surface.calls.is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_alerts_under_alert_policy() {
        let controller = TurnController::new(EmptySubmissionPolicy::Alert);
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Open);
        let mut surface = RecordingSurface::default();

        let outcome = controller
            .submit("  ", &mut store, &transport, &mut surface)
            .await;

        assert_eq!(outcome, Err(SubmitError::EmptySubmission));
        assert_eq!(
            SubmitError::EmptySubmission.to_string(),
            "Please enter a message."
        );
        assert!(store.is_empty());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_submit_runs_side_effects_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let controller = TurnController::new(EmptySubmissionPolicy::default());
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Open);
        let transport = transport.with_call_log(calls.clone());
        let mut surface = RecordingSurface::with_call_log(calls.clone());

        let outcome = controller
            .submit("hi", &mut store, &transport, &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted(TurnId::new(0)));
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["send:hi", "clear_input", "scroll_to_latest"]
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_raw_text_is_sent_untrimmed() {
        let controller = TurnController::new(EmptySubmissionPolicy::default());
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Open);
        let mut surface = RecordingSurface::default();

        controller
            .submit("  hello  ", &mut store, &transport, &mut surface)
            .await
            .unwrap();

        assert_eq!(transport.sent(), vec!["  hello  "]);
        assert_eq!(store.snapshot().turns()[0].user_text(), "  hello  ");
    }

    #[tokio::test]
    async fn test_submit_while_closed_appends_turn_and_drops_send() {
        let logger = Arc::new(RecordingLogger::default());
        let controller = TurnController::new(EmptySubmissionPolicy::default())
            .with_conversation_logger(logger.clone());
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Closed);
        let mut surface = RecordingSurface::default();

        let outcome = controller
            .submit("hi", &mut store, &transport, &mut surface)
            .await;

        assert!(matches!(outcome, Ok(SubmitOutcome::Submitted(_))));
        assert!(transport.sent().is_empty());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.turns()[0].status(), TurnStatus::Pending);
        assert_eq!(logger.event_types(), vec!["turn_submitted", "send_dropped"]);
    }

    #[tokio::test]
    async fn test_each_submit_appends_a_turn() {
        let controller = TurnController::new(EmptySubmissionPolicy::default());
        let mut store = TranscriptStore::new(SourcePolicy::default());
        let (transport, _rx) = MockTransport::new(ConnectionState::Open);
        let mut surface = RecordingSurface::default();

        for text in ["a", "b", "c"] {
            controller
                .submit(text, &mut store, &transport, &mut surface)
                .await
                .unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.turns()[0].status(), TurnStatus::Complete);
        assert_eq!(snapshot.turns()[2].status(), TurnStatus::Pending);
    }
}
