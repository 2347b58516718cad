//! Render surface port
//!
//! The view the chat core drives: an input buffer, a scrollable transcript
//! area and a place for status notices. The core only ever hands it
//! immutable snapshots.

use streamchat_domain::TranscriptSnapshot;

/// Status notices shown outside the transcript itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceNotice {
    Connected,
    ConnectionError(String),
    Disconnected,
}

/// Render target for a mounted chat view.
pub trait ChatSurface: Send {
    /// Empty the user's input buffer after a submission.
    fn clear_input(&mut self);

    /// Bring the latest turn into view.
    fn scroll_to_latest(&mut self);

    /// Redraw from a snapshot.
    fn render(&mut self, snapshot: &TranscriptSnapshot);

    /// Show a connection status notice.
    fn notify(&mut self, _notice: SurfaceNotice) {}
}

/// Surface that discards everything (headless use and tests).
pub struct NoSurface;

impl ChatSurface for NoSurface {
    fn clear_input(&mut self) {}
    fn scroll_to_latest(&mut self) {}
    fn render(&mut self, _snapshot: &TranscriptSnapshot) {}
}
