//! Chat endpoint adapter
//!
//! WebSocket implementation of the [`ChatTransport`] port and the codec for
//! inbound frames.
//!
//! [`ChatTransport`]: streamchat_application::ports::transport::ChatTransport

pub mod decoder;
pub mod ws_transport;

pub use decoder::{DecodeError, FragmentDecoder};
pub use ws_transport::{DEFAULT_CONNECT_TIMEOUT, WsChatTransport};
