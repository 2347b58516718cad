//! Chat transport port
//!
//! Defines the interface of the duplex connection to the chat endpoint.
//! The adapter owns the socket; the application only sees a lifecycle
//! state, a fire-and-forget `send`, and a stream of [`TransportEvent`]s.

use async_trait::async_trait;
use streamchat_domain::{ConnectionState, Fragment};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors returned by transport operations.
///
/// Connection failures during `connect` are also reported as
/// [`TransportEvent::Error`] so the event loop sees every failure in order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Connection is already {0}")]
    AlreadyActive(ConnectionState),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Connection timed out after {0} seconds")]
    Timeout(u64),
}

/// Inbound events, delivered in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed; state is `Open`.
    Opened,
    /// A decoded inbound fragment.
    Fragment(Fragment),
    /// The connection failed or reported an error. Does not end the session.
    Error(String),
    /// The connection is gone; state is `Closed`.
    Closed,
}

/// What happened to an outbound message.
///
/// Informational only: sends are at-most-once and nobody retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// The connection was not `Open` (or the write failed); nothing went out.
    Dropped,
}

/// Sending half of the transport event queue (held by the adapter).
pub type TransportEventSender = mpsc::UnboundedSender<TransportEvent>;

/// Receiving half of the transport event queue (held by the chat session).
pub type TransportEventReceiver = mpsc::UnboundedReceiver<TransportEvent>;

/// Create the single event queue shared by a transport and its session.
pub fn transport_event_channel() -> (TransportEventSender, TransportEventReceiver) {
    mpsc::unbounded_channel()
}

/// Duplex connection to the chat backend.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Open the connection: `Closed → Connecting → Open`.
    ///
    /// Only allowed from `Closed`; otherwise returns
    /// [`TransportError::AlreadyActive`].
    async fn connect(&self, endpoint: &str) -> Result<(), TransportError>;

    /// Send one utterance as a single unframed text message.
    ///
    /// A no-op returning [`SendOutcome::Dropped`] unless the state is `Open`.
    async fn send(&self, text: &str) -> SendOutcome;

    /// Tear the connection down. No fragment is delivered after this returns.
    async fn close(&self);

    /// Current lifecycle state.
    fn state(&self) -> ConnectionState;
}
