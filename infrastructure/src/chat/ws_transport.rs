//! WebSocket chat transport.
//!
//! [`WsChatTransport`] owns one WebSocket connection at a time. A background
//! reader task owns the read half exclusively and pushes decoded
//! [`TransportEvent`]s into the session's event queue in arrival order; it
//! never touches the transcript. Writes go through a `tokio::sync::Mutex`
//! around the write half.
//!
//! ```text
//!   connect()                 reader task                    close() / Drop
//!  ───────────►  Open  ──► text/binary frame ──► Fragment     cancel token
//!                 │        read error ─────────► Error        await/abort reader
//!                 │        close frame / EOF ──► Closed       send close frame
//! ```

use super::decoder::FragmentDecoder;
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use streamchat_application::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use streamchat_application::ports::transport::{
    ChatTransport, SendOutcome, TransportError, TransportEvent, TransportEventSender,
};
use streamchat_domain::{ConnectionState, ProtocolVariant};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Default handshake timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

/// Lifecycle state shared between the transport and its reader task.
///
/// Uses `std::sync::RwLock` so `state()` and `Drop` stay synchronous; the
/// lock is only held for a read or a single assignment.
#[derive(Clone, Default)]
struct SharedState(Arc<RwLock<ConnectionState>>);

impl SharedState {
    fn get(&self) -> ConnectionState {
        *self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, state: ConnectionState) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// `Closed → Connecting`, atomically. Returns the blocking state otherwise.
    fn begin_connect(&self) -> Result<(), ConnectionState> {
        let mut state = self.0.write().unwrap_or_else(|e| e.into_inner());
        if !state.can_connect() {
            return Err(*state);
        }
        *state = ConnectionState::Connecting;
        Ok(())
    }

    /// Move to `Closed` and emit `Closed` exactly once per connection.
    fn close(&self, events: &TransportEventSender) -> bool {
        let mut state = self.0.write().unwrap_or_else(|e| e.into_inner());
        if *state == ConnectionState::Closed {
            return false;
        }
        *state = ConnectionState::Closed;
        let _ = events.send(TransportEvent::Closed);
        true
    }
}

/// Handle to the running reader task.
struct ReaderTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// [`ChatTransport`] over a WebSocket (tokio-tungstenite).
pub struct WsChatTransport {
    decoder: FragmentDecoder,
    connect_timeout: Duration,
    events: TransportEventSender,
    state: SharedState,
    writer: Arc<Mutex<Option<WsWriter>>>,
    reader: std::sync::Mutex<Option<ReaderTask>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl WsChatTransport {
    /// Create a closed transport that will publish into `events`.
    pub fn new(protocol: ProtocolVariant, events: TransportEventSender) -> Self {
        Self {
            decoder: FragmentDecoder::new(protocol),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            events,
            state: SharedState::default(),
            writer: Arc::new(Mutex::new(None)),
            reader: std::sync::Mutex::new(None),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Report a failed connection attempt: `Error` then `Closed`.
    fn fail_connect(&self, error: TransportError) -> TransportError {
        warn!("WebSocket connect failed: {}", error);
        let _ = self.events.send(TransportEvent::Error(error.to_string()));
        self.state.close(&self.events);
        error
    }

    fn take_reader(&self) -> Option<ReaderTask> {
        self.reader
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Background reader loop: single owner of the read half.
    ///
    /// Exits on cancellation, on a close frame or when the stream ends. Only
    /// the latter two publish `Closed`; on cancellation the closer does.
    async fn reader_loop(
        mut reader: WsReader,
        decoder: FragmentDecoder,
        events: TransportEventSender,
        state: SharedState,
        writer: Arc<Mutex<Option<WsWriter>>>,
        cancel: CancellationToken,
        conversation_logger: Arc<dyn ConversationLogger>,
    ) {
        loop {
            let message = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("WebSocket reader cancelled");
                    return;
                }
                message = reader.next() => message,
            };

            let decoded = match message {
                Some(Ok(Message::Text(text))) => {
                    trace!("WebSocket text frame ({} bytes)", text.len());
                    decoder.decode_text(text.as_str())
                }
                Some(Ok(Message::Binary(bytes))) => {
                    trace!("WebSocket binary frame ({} bytes)", bytes.len());
                    decoder.decode_binary(&bytes)
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!("WebSocket close frame received: {:?}", frame);
                    break;
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    warn!("WebSocket read error: {}", e);
                    state.set(ConnectionState::Erroring);
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    continue;
                }
                None => {
                    debug!("WebSocket stream ended");
                    break;
                }
            };

            match decoded {
                Ok(fragment) => {
                    if cancel.is_cancelled() {
                        return;
                    }
                    let _ = events.send(TransportEvent::Fragment(fragment));
                }
                Err(e) => {
                    warn!("Dropping malformed frame: {}", e);
                    conversation_logger.log(ConversationEvent::new(
                        "malformed_fragment",
                        serde_json::json!({
                            "protocol": decoder.variant().as_str(),
                            "reason": e.to_string(),
                        }),
                    ));
                }
            }
        }

        writer.lock().await.take();
        if state.close(&events) {
            info!("WebSocket connection closed by peer");
        }
    }
}

#[async_trait]
impl ChatTransport for WsChatTransport {
    async fn connect(&self, endpoint: &str) -> Result<(), TransportError> {
        self.state
            .begin_connect()
            .map_err(TransportError::AlreadyActive)?;

        let url = match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "ws" | "wss") => url,
            Ok(url) => {
                return Err(self.fail_connect(TransportError::InvalidEndpoint(format!(
                    "unsupported scheme `{}` in {}",
                    url.scheme(),
                    endpoint
                ))));
            }
            Err(e) => {
                return Err(self.fail_connect(TransportError::InvalidEndpoint(format!(
                    "{}: {}",
                    endpoint, e
                ))));
            }
        };

        debug!("Connecting to {}", url);
        let stream = match tokio::time::timeout(self.connect_timeout, connect_async(url.as_str()))
            .await
        {
            Ok(Ok((stream, response))) => {
                trace!("WebSocket handshake status: {}", response.status());
                stream
            }
            Ok(Err(e)) => return Err(self.fail_connect(TransportError::Connect(e.to_string()))),
            Err(_) => {
                return Err(self.fail_connect(TransportError::Timeout(
                    self.connect_timeout.as_secs(),
                )));
            }
        };

        let (write_half, read_half) = stream.split();
        *self.writer.lock().await = Some(write_half);

        self.state.set(ConnectionState::Open);
        let _ = self.events.send(TransportEvent::Opened);
        info!("WebSocket connected to {}", url);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Self::reader_loop(
            read_half,
            self.decoder,
            self.events.clone(),
            self.state.clone(),
            Arc::clone(&self.writer),
            cancel.clone(),
            Arc::clone(&self.conversation_logger),
        ));

        let previous = self
            .reader
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(ReaderTask { cancel, handle });
        if let Some(stale) = previous {
            // Reader of a connection that already ended on its own.
            stale.cancel.cancel();
        }

        Ok(())
    }

    async fn send(&self, text: &str) -> SendOutcome {
        let state = self.state.get();
        if !state.can_send() {
            debug!("Send dropped: connection is {}", state);
            return SendOutcome::Dropped;
        }

        let mut writer = self.writer.lock().await;
        let Some(sink) = writer.as_mut() else {
            return SendOutcome::Dropped;
        };

        match sink.send(Message::text(text)).await {
            Ok(()) => {
                trace!("Sent {} bytes", text.len());
                SendOutcome::Sent
            }
            Err(e) => {
                warn!("WebSocket write failed: {}", e);
                self.state.set(ConnectionState::Erroring);
                let _ = self.events.send(TransportEvent::Error(e.to_string()));
                SendOutcome::Dropped
            }
        }
    }

    async fn close(&self) {
        if let Some(reader) = self.take_reader() {
            reader.cancel.cancel();
            if let Err(e) = reader.handle.await
                && !e.is_cancelled()
            {
                warn!("WebSocket reader task failed: {}", e);
            }
        }

        if let Some(mut sink) = self.writer.lock().await.take() {
            let _ = sink.send(Message::Close(None)).await;
            let _ = sink.close().await;
        }

        if self.state.close(&self.events) {
            info!("WebSocket connection closed");
        }
    }

    fn state(&self) -> ConnectionState {
        self.state.get()
    }
}

impl Drop for WsChatTransport {
    fn drop(&mut self) {
        if let Some(reader) = self.take_reader() {
            debug!("WsChatTransport dropping, stopping reader task");
            reader.cancel.cancel();
            reader.handle.abort();
        }
    }
}
