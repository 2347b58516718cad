//! Interactive chat view
//!
//! Owns one mounted [`ChatSession`] and multiplexes two inputs in a single
//! loop: lines typed by the user and events from the chat transport. Every
//! transcript mutation happens here, one event at a time.

use super::commands::{ReplCommand, ReplInput};
use super::console_surface::ConsoleSurface;
use crate::files::FilePanel;
use crate::output::console::ConsoleFormatter;
use std::io::Write;
use streamchat_application::{ChatSession, SubmitError, TransportError};
use streamchat_domain::TranscriptSnapshot;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// What the loop does after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Console chat view: transcript, input line and file panel.
pub struct ChatView<W: Write + Send = std::io::Stdout> {
    session: ChatSession,
    files: FilePanel,
    surface: ConsoleSurface<W>,
}

impl ChatView<std::io::Stdout> {
    /// Run on the process's stdin until `/quit` or end of input.
    pub async fn run(self) -> std::io::Result<TranscriptSnapshot> {
        self.run_with(BufReader::new(tokio::io::stdin())).await
    }
}

impl<W: Write + Send> ChatView<W> {
    pub fn new(session: ChatSession, files: FilePanel, surface: ConsoleSurface<W>) -> Self {
        Self {
            session,
            files,
            surface,
        }
    }

    /// Mount the session, serve `input` until quit, then unmount.
    ///
    /// Returns the final transcript.
    pub async fn run_with<R>(mut self, input: R) -> std::io::Result<TranscriptSnapshot>
    where
        R: AsyncBufRead + Unpin,
    {
        if let Err(e) = self.session.mount().await {
            // The failure is also delivered as Error + Closed events.
            debug!("Initial connect failed: {}", e);
        }
        self.surface
            .print_line(&ConsoleFormatter::format_welcome(self.session.endpoint()));

        let mut lines = input.lines();
        let mut events_open = true;

        loop {
            tokio::select! {
                biased;

                event = self.session.next_event(), if events_open => match event {
                    Some(event) => self.session.handle_event(event, &mut self.surface),
                    None => {
                        debug!("Transport event queue closed");
                        events_open = false;
                    }
                },
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line).await == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        info!("End of input");
                        break;
                    }
                },
            }
        }

        let transcript = self.session.unmount().await;
        self.surface.print_line("Bye!");
        Ok(transcript)
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        let command = match ReplInput::parse(line) {
            ReplInput::Text(text) => {
                self.submit(text).await;
                return Flow::Continue;
            }
            ReplInput::Command(command) => command,
        };
        debug!("Command: {:?}", command);

        match command {
            ReplCommand::Help => self.surface.print_line(&ConsoleFormatter::format_help()),
            ReplCommand::Files => {
                let output = self.files.list().await;
                self.surface.print_line(&output);
            }
            ReplCommand::Upload(path) => {
                let output = self.files.upload(&path).await;
                self.surface.print_line(&output);
            }
            ReplCommand::Delete(filename) => {
                let output = self.files.delete(&filename).await;
                self.surface.print_line(&output);
            }
            ReplCommand::Status => {
                let status = ConsoleFormatter::format_status(
                    self.session.connection_state(),
                    self.session.endpoint(),
                    &self.session.behavior(),
                    self.session.snapshot().len(),
                );
                self.surface.print_line(&status);
            }
            ReplCommand::Transcript => {
                let transcript = ConsoleFormatter::format_transcript(&self.session.snapshot());
                self.surface.print_line(&transcript);
            }
            ReplCommand::Reconnect => self.reconnect().await,
            ReplCommand::Quit => return Flow::Quit,
            ReplCommand::Unknown(input) => {
                self.surface.print_line(&format!(
                    "Unknown command: {}\nType /help for available commands",
                    input
                ));
            }
        }
        Flow::Continue
    }

    async fn submit(&mut self, line: &str) {
        match self.session.submit(line, &mut self.surface).await {
            Ok(outcome) => debug!("Submission: {:?}", outcome),
            Err(e @ SubmitError::EmptySubmission) => self.surface.alert(&e.to_string()),
        }
    }

    async fn reconnect(&mut self) {
        match self.session.reconnect().await {
            Ok(()) => {}
            Err(e @ TransportError::AlreadyActive(_)) => {
                self.surface.print_line(&ConsoleFormatter::format_error(&e.to_string()));
            }
            // Reported through the event queue.
            Err(e) => debug!("Reconnect failed: {}", e),
        }
    }
}
