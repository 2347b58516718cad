//! Chat session use case.
//!
//! View-scoped orchestrator: owns the transcript, the accumulator, the turn
//! controller and the transport handle for one mounted chat view. All
//! transcript mutation happens through `submit` and `handle_event`, which the
//! view calls from a single event loop.

use super::accumulator::{AccumulateOutcome, StreamingAccumulator};
use super::transcript_store::TranscriptStore;
use super::turn_controller::{SubmitError, SubmitOutcome, TurnController};
use crate::config::ChatBehavior;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::surface::{ChatSurface, SurfaceNotice};
use crate::ports::transport::{
    ChatTransport, TransportError, TransportEvent, TransportEventReceiver,
};
use std::sync::Arc;
use streamchat_domain::{ConnectionState, Fragment, TranscriptSnapshot};
use tracing::{debug, info, warn};

/// One mounted chat view's worth of state.
///
/// Created with [`ChatSession::new`], connected with [`mount`](Self::mount)
/// and torn down with [`unmount`](Self::unmount), which consumes the session
/// so no event can be applied afterwards.
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    events: TransportEventReceiver,
    endpoint: String,
    behavior: ChatBehavior,
    store: TranscriptStore,
    accumulator: StreamingAccumulator,
    controller: TurnController,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSession {
    /// Create a session around a transport and the receiving half of its
    /// event queue. Nothing connects until [`mount`](Self::mount).
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        events: TransportEventReceiver,
        endpoint: impl Into<String>,
    ) -> Self {
        let behavior = ChatBehavior::default();
        Self {
            transport,
            events,
            endpoint: endpoint.into(),
            behavior,
            store: TranscriptStore::new(behavior.source_policy),
            accumulator: StreamingAccumulator::new(),
            controller: TurnController::new(behavior.empty_submission),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: ChatBehavior) -> Self {
        self.behavior = behavior;
        self.rebuild_components();
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self.rebuild_components();
        self
    }

    fn rebuild_components(&mut self) {
        self.store = TranscriptStore::new(self.behavior.source_policy)
            .with_logger(self.conversation_logger.clone());
        self.controller = TurnController::new(self.behavior.empty_submission)
            .with_conversation_logger(self.conversation_logger.clone());
    }

    /// Start the connection for a freshly mounted view.
    ///
    /// A failed connect is not fatal: the failure also arrives as
    /// [`TransportEvent::Error`] followed by [`TransportEvent::Closed`], and
    /// submissions keep working (their sends are dropped).
    pub async fn mount(&mut self) -> Result<(), TransportError> {
        info!("Mounting chat session on {}", self.endpoint);
        self.conversation_logger.log(ConversationEvent::new(
            "session_mounted",
            serde_json::json!({
                "endpoint": self.endpoint,
                "protocol": self.behavior.protocol.as_str(),
            }),
        ));
        self.connect().await
    }

    /// Open a fresh connection after the previous one closed.
    ///
    /// Only valid while the state is `Closed`.
    pub async fn reconnect(&mut self) -> Result<(), TransportError> {
        let state = self.transport.state();
        if !state.can_connect() {
            return Err(TransportError::AlreadyActive(state));
        }
        info!("Reconnecting to {}", self.endpoint);
        self.connect().await
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        let result = self.transport.connect(&self.endpoint).await;
        if let Err(e) = &result {
            warn!("Connect to {} failed: {}", self.endpoint, e);
        }
        result
    }

    /// Submit user text through the turn controller.
    pub async fn submit(
        &mut self,
        raw_text: &str,
        surface: &mut dyn ChatSurface,
    ) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self
            .controller
            .submit(raw_text, &mut self.store, self.transport.as_ref(), surface)
            .await?;

        if let SubmitOutcome::Submitted(id) = outcome {
            self.accumulator.track(id);
            surface.render(&self.store.snapshot());
        }
        Ok(outcome)
    }

    /// Wait for the next transport event.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to user input.
    /// Returns `None` once the transport has gone away for good.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Apply one transport event and redraw if the transcript changed.
    pub fn handle_event(&mut self, event: TransportEvent, surface: &mut dyn ChatSurface) {
        match event {
            TransportEvent::Opened => {
                info!("Connected to {}", self.endpoint);
                self.log_lifecycle("connection_opened", None);
                surface.notify(SurfaceNotice::Connected);
            }
            TransportEvent::Fragment(fragment) => {
                self.apply_fragment(&fragment, surface);
            }
            TransportEvent::Error(message) => {
                warn!("Connection error: {}", message);
                self.log_lifecycle("connection_error", Some(&message));
                surface.notify(SurfaceNotice::ConnectionError(message));
            }
            TransportEvent::Closed => {
                info!("Connection to {} closed", self.endpoint);
                self.log_lifecycle("connection_closed", None);
                self.accumulator.release();
                let completed = self.store.complete_open_turn();
                surface.notify(SurfaceNotice::Disconnected);
                if let Some(id) = completed {
                    debug!("Turn {} completed by connection close", id);
                    surface.render(&self.store.snapshot());
                }
            }
        }
    }

    fn apply_fragment(&mut self, fragment: &Fragment, surface: &mut dyn ChatSurface) {
        match self.accumulator.apply(&mut self.store, fragment) {
            AccumulateOutcome::Applied(_) => surface.render(&self.store.snapshot()),
            AccumulateOutcome::Orphaned => {
                warn!(
                    "Dropping fragment with no open turn ({} bytes)",
                    fragment.text().len()
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "orphan_fragment",
                    serde_json::json!({
                        "reason": "no open turn",
                        "bytes": fragment.text().len(),
                        "source": fragment.source(),
                    }),
                ));
            }
            // Already reported by the store.
            AccumulateOutcome::Rejected(_) => {}
        }
    }

    fn log_lifecycle(&self, event_type: &'static str, message: Option<&str>) {
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            serde_json::json!({
                "endpoint": self.endpoint,
                "message": message,
            }),
        ));
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        self.store.snapshot()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.transport.state()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn behavior(&self) -> ChatBehavior {
        self.behavior
    }

    /// Tear the view down.
    ///
    /// Closes the transport, stops routing fragments and discards every event
    /// still queued. Returns the final transcript.
    pub async fn unmount(mut self) -> TranscriptSnapshot {
        self.transport.close().await;
        self.accumulator.release();
        self.events.close();

        let mut discarded = 0usize;
        while self.events.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!("Discarded {} queued transport events on unmount", discarded);
        }

        self.conversation_logger.log(ConversationEvent::new(
            "session_unmounted",
            serde_json::json!({
                "turns": self.store.len(),
                "discarded_events": discarded,
            }),
        ));
        info!("Chat session unmounted ({} turns)", self.store.len());
        self.store.snapshot()
    }
}
