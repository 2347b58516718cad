//! Streaming console renderer
//!
//! A terminal cannot redraw a transcript in place, so [`ConsoleSurface`]
//! keeps a cursor into the last snapshot it saw and writes only what is new:
//! the unseen tail of the streaming response, then a line break and the
//! source once the turn completes.

use crate::output::console::{BOT_PREFIX, ConsoleFormatter};
use crate::progress::ResponseSpinner;
use colored::Colorize;
use std::io::Write;
use streamchat_application::{ChatSurface, SurfaceNotice};
use streamchat_domain::{TranscriptSnapshot, Turn, TurnStatus};
use tracing::trace;

/// Render position within the transcript.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    /// Turns before this index are fully written.
    finished: usize,
    /// Bytes of the current turn's bot text already written.
    streamed: usize,
    /// Whether a bot line is open (prefix written, no line break yet).
    line_open: bool,
}

/// [`ChatSurface`] writing to a terminal (or any writer).
pub struct ConsoleSurface<W: Write + Send = std::io::Stdout> {
    out: W,
    cursor: Cursor,
    spinner: ResponseSpinner,
}

impl ConsoleSurface<std::io::Stdout> {
    /// Surface on stdout; the spinner goes to stderr when `show_progress`.
    pub fn stdout(show_progress: bool) -> Self {
        Self::new(std::io::stdout(), show_progress)
    }
}

impl<W: Write + Send> ConsoleSurface<W> {
    pub fn new(out: W, show_progress: bool) -> Self {
        Self {
            out,
            cursor: Cursor::default(),
            spinner: ResponseSpinner::new(show_progress),
        }
    }

    /// Print a line outside the transcript flow (command output, alerts).
    ///
    /// Breaks an in-progress response line first so the message starts on
    /// its own line.
    pub fn print_line(&mut self, line: &str) {
        self.spinner.stop();
        if self.cursor.line_open {
            let _ = writeln!(self.out);
            self.cursor.line_open = false;
        }
        let _ = writeln!(self.out, "{}", line.trim_end_matches('\n'));
        let _ = self.out.flush();
    }

    /// Show a blocking validation message.
    pub fn alert(&mut self, message: &str) {
        self.print_line(&format!("{} {}", "!".yellow().bold(), message));
    }

    /// Consume the surface and return the writer (tests inspect it).
    pub fn into_inner(mut self) -> W {
        self.spinner.stop();
        let _ = self.out.flush();
        self.out
    }

    fn write_delta(&mut self, turn: &Turn) {
        let text = turn.bot_text();
        let Some(delta) = text.get(self.cursor.streamed..) else {
            return;
        };
        if delta.is_empty() {
            return;
        }

        self.spinner.stop();
        if !self.cursor.line_open {
            let _ = write!(self.out, "{} ", BOT_PREFIX.green().bold());
            self.cursor.line_open = true;
        }
        let _ = write!(self.out, "{}", delta);
        self.cursor.streamed = text.len();
    }

    fn finish_turn(&mut self, turn: &Turn) {
        if self.cursor.streamed == 0 {
            let _ = writeln!(
                self.out,
                "{} {}",
                BOT_PREFIX.green().bold(),
                "(no response)".dimmed()
            );
        } else if self.cursor.line_open {
            let _ = writeln!(self.out);
        }
        if !turn.bot_source().is_empty() {
            let _ = writeln!(self.out, "{}", ConsoleFormatter::format_source(turn.bot_source()));
        }
        self.cursor = Cursor {
            finished: self.cursor.finished + 1,
            ..Cursor::default()
        };
    }
}

impl<W: Write + Send> ChatSurface for ConsoleSurface<W> {
    fn clear_input(&mut self) {
        // The line reader already consumed the input line.
        trace!("clear_input");
    }

    fn scroll_to_latest(&mut self) {
        let _ = self.out.flush();
    }

    fn render(&mut self, snapshot: &TranscriptSnapshot) {
        let turns = snapshot.turns();
        while let Some(turn) = turns.get(self.cursor.finished) {
            self.write_delta(turn);
            if turn.status() != TurnStatus::Complete {
                break;
            }
            self.finish_turn(turn);
        }

        if snapshot.awaiting_response() {
            self.spinner.start();
        } else {
            self.spinner.stop();
        }
        let _ = self.out.flush();
    }

    fn notify(&mut self, notice: SurfaceNotice) {
        self.print_line(&ConsoleFormatter::format_notice(&notice));
    }
}
