//! Inbound wire protocol variant

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which inbound frame format the backend speaks.
///
/// Not negotiated: the client must be configured to match the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVariant {
    /// Each frame is a raw UTF-8 text chunk.
    Plain,
    /// Each frame is a JSON object `{ "response": string, "source": string }`.
    #[default]
    Structured,
}

impl ProtocolVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVariant::Plain => "plain",
            ProtocolVariant::Structured => "structured",
        }
    }
}

impl std::fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProtocolVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(ProtocolVariant::Plain),
            "structured" | "json" => Ok(ProtocolVariant::Structured),
            other => Err(DomainError::UnknownProtocolVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_structured() {
        assert_eq!(ProtocolVariant::default(), ProtocolVariant::Structured);
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("plain".parse::<ProtocolVariant>().unwrap(), ProtocolVariant::Plain);
        assert_eq!("JSON".parse::<ProtocolVariant>().unwrap(), ProtocolVariant::Structured);
        assert!("sse".parse::<ProtocolVariant>().is_err());
    }

    #[test]
    fn test_deserialize_lowercase() {
        let variant: ProtocolVariant = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(variant, ProtocolVariant::Plain);
    }
}
