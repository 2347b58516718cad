//! Streaming vocabulary shared by the transport and the accumulator.
//!
//! - [`fragment::Fragment`]: one inbound piece of a bot response
//! - [`connection::ConnectionState`]: lifecycle of the duplex connection
//! - [`protocol::ProtocolVariant`]: inbound frame format (plain or structured)

pub mod connection;
pub mod fragment;
pub mod protocol;
