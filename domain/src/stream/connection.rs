//! Connection lifecycle state

use serde::{Deserialize, Serialize};

/// State of the duplex chat connection.
///
/// ```text
/// Closed ──connect──▶ Connecting ──handshake ok──▶ Open
///    ▲                    │                         │
///    │◀──handshake failed─┘                         ├──error──▶ Erroring
///    │                                              │              │
///    └──────────────────────close───────────────────┴──────────────┘
/// ```
///
/// `Erroring` does not end the session by itself; only a close event moves
/// the state back to `Closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
    Erroring,
}

impl ConnectionState {
    /// Only an open connection accepts outbound frames.
    pub fn can_send(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// A new `connect()` is only allowed from `Closed`.
    pub fn can_connect(&self) -> bool {
        matches!(self, ConnectionState::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Closed => "closed",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Erroring => "erroring",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        assert_eq!(ConnectionState::default(), ConnectionState::Closed);
    }

    #[test]
    fn test_only_open_can_send() {
        assert!(ConnectionState::Open.can_send());
        assert!(!ConnectionState::Closed.can_send());
        assert!(!ConnectionState::Connecting.can_send());
        assert!(!ConnectionState::Erroring.can_send());
    }

    #[test]
    fn test_only_closed_can_connect() {
        assert!(ConnectionState::Closed.can_connect());
        assert!(!ConnectionState::Open.can_connect());
        assert!(!ConnectionState::Connecting.can_connect());
        assert!(!ConnectionState::Erroring.can_connect());
    }
}
