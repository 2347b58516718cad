//! Inbound frame decoding.
//!
//! The backend speaks one of two formats on the chat socket, chosen by
//! configuration:
//!
//! - **plain**: each frame's text is the fragment text, with no source.
//! - **structured**: each frame is a JSON object
//!   `{ "response": string, "source": string }`. Both fields are optional
//!   and a missing or `null` field reads as empty.
//!
//! Anything else is a [`DecodeError`]. The reader loop drops such frames and
//! keeps going.

use streamchat_domain::{Fragment, ProtocolVariant};
use thiserror::Error;

/// Why an inbound frame could not become a [`Fragment`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Frame is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Field `{0}` must be a string")]
    WrongFieldType(&'static str),

    #[error("Binary frame is not valid UTF-8")]
    InvalidUtf8,
}

/// Decodes inbound frames for one protocol variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentDecoder {
    variant: ProtocolVariant,
}

impl FragmentDecoder {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Decode a text frame.
    pub fn decode_text(&self, frame: &str) -> Result<Fragment, DecodeError> {
        match self.variant {
            ProtocolVariant::Plain => Ok(Fragment::text_only(frame)),
            ProtocolVariant::Structured => decode_structured(frame),
        }
    }

    /// Decode a binary frame as UTF-8 text.
    pub fn decode_binary(&self, frame: &[u8]) -> Result<Fragment, DecodeError> {
        let text = std::str::from_utf8(frame).map_err(|_| DecodeError::InvalidUtf8)?;
        self.decode_text(text)
    }
}

fn decode_structured(frame: &str) -> Result<Fragment, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(frame).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(&value)))?;

    let response = string_field(object, "response")?;
    let source = string_field(object, "source")?;
    Ok(Fragment::new(response, source))
}

fn string_field(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<String, DecodeError> {
    match object.get(field) {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeError::WrongFieldType(field)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
