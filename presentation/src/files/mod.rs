//! Knowledge-file panel

mod panel;

pub use panel::FilePanel;
