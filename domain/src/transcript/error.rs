//! Transcript mutation errors

use super::turn::TurnId;
use thiserror::Error;

/// Reasons a fragment could not be applied to the transcript.
///
/// None of these are fatal: callers drop the fragment and carry on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Transcript is empty")]
    Empty,

    #[error("No turn with id {0}")]
    UnknownTurn(TurnId),

    #[error("Turn {0} is already complete")]
    TurnComplete(TurnId),
}
