//! Console output formatter for transcripts, status and file listings

use colored::Colorize;
use streamchat_application::{ChatBehavior, FileChange, SurfaceNotice};
use streamchat_domain::{ConnectionState, TranscriptSnapshot, Turn, TurnStatus};

/// Prefix of the user's side of a turn.
pub const USER_PREFIX: &str = "you>";

/// Prefix of the bot's side of a turn.
pub const BOT_PREFIX: &str = "bot>";

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the whole transcript
    pub fn format_transcript(snapshot: &TranscriptSnapshot) -> String {
        if snapshot.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        let mut output = String::new();
        output.push_str(&Self::header("Transcript"));
        for turn in snapshot.turns() {
            output.push_str(&Self::format_turn(turn));
        }
        output
    }

    /// Format one turn: user line, bot text, source line
    pub fn format_turn(turn: &Turn) -> String {
        let mut output = format!("{} {}\n", USER_PREFIX.cyan().bold(), turn.user_text());

        let bot_text = match (turn.status(), turn.bot_text().is_empty()) {
            (TurnStatus::Pending, _) => "(waiting for response)".dimmed().to_string(),
            (_, true) => "(no response)".dimmed().to_string(),
            (_, false) => turn.bot_text().to_string(),
        };
        output.push_str(&format!("{} {}\n", BOT_PREFIX.green().bold(), bot_text));

        if !turn.bot_source().is_empty() {
            output.push_str(&Self::format_source(turn.bot_source()));
            output.push('\n');
        }
        output
    }

    /// Format the source attribution of a response
    pub fn format_source(source: &str) -> String {
        format!("     {} {}", "source:".dimmed(), source.italic())
    }

    /// Format a connection notice
    pub fn format_notice(notice: &SurfaceNotice) -> String {
        match notice {
            SurfaceNotice::Connected => format!("{} Connected", "*".green().bold()),
            SurfaceNotice::ConnectionError(message) => {
                format!("{} Connection error: {}", "!".red().bold(), message)
            }
            SurfaceNotice::Disconnected => format!(
                "{} Disconnected. Messages will not be sent until /reconnect.",
                "*".yellow().bold()
            ),
        }
    }

    /// Format the `/status` report
    pub fn format_status(
        state: ConnectionState,
        endpoint: &str,
        behavior: &ChatBehavior,
        turns: usize,
    ) -> String {
        let state_text = match state {
            ConnectionState::Open => state.as_str().green(),
            ConnectionState::Connecting => state.as_str().yellow(),
            ConnectionState::Erroring => state.as_str().red(),
            ConnectionState::Closed => state.as_str().red(),
        };

        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Connection:".cyan().bold(), state_text));
        output.push_str(&format!("{} {}\n", "Endpoint:".cyan().bold(), endpoint));
        output.push_str(&format!(
            "{} {}\n",
            "Protocol:".cyan().bold(),
            behavior.protocol
        ));
        output.push_str(&format!("{} {}\n", "Turns:".cyan().bold(), turns));
        output
    }

    /// Format a file listing
    pub fn format_file_list(files: &[String]) -> String {
        if files.is_empty() {
            return format!("{}\n", "(no files uploaded)".dimmed());
        }

        let mut output = format!("{} ({})\n", "Files:".cyan().bold(), files.len());
        for file in files {
            output.push_str(&format!("  * {}\n", file));
        }
        output
    }

    /// Format the result of an upload or delete, followed by the new listing
    pub fn format_file_change(change: &FileChange) -> String {
        let mut output = format!("{} {}\n", "v".green(), change.ack.summary());
        output.push_str(&Self::format_file_list(&change.files));
        output
    }

    /// Format an error line
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Format the REPL help text
    pub fn format_help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        for (command, description) in [
            ("/help", "Show this help"),
            ("/files", "List uploaded knowledge files"),
            ("/upload <path>", "Upload a local file"),
            ("/delete <name>", "Delete an uploaded file"),
            ("/status", "Show connection status"),
            ("/transcript", "Print the whole conversation"),
            ("/reconnect", "Open a new connection after a disconnect"),
            ("/quit", "Exit"),
        ] {
            output.push_str(&format!("  {:<16} - {}\n", command, description));
        }
        output.push_str("Anything else is sent to the chatbot.\n");
        output.push_str("Start a line with // to send text beginning with /.\n");
        output
    }

    /// Format the banner shown when the chat view starts
    pub fn format_welcome(endpoint: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str("╭─────────────────────────────────────────────╮\n");
        output.push_str("│               streamchat                    │\n");
        output.push_str("╰─────────────────────────────────────────────╯\n");
        output.push_str(&format!("{} {}\n\n", "Chatbot:".cyan().bold(), endpoint));
        output.push_str(&Self::format_help());
        output
    }

    fn header(title: &str) -> String {
        format!("{}\n", format!("=== {} ===", title).cyan().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamchat_application::FileAck;
    use streamchat_domain::{Fragment, SourcePolicy, Transcript};

    fn plain() {
        colored::control::set_override(false);
    }

    fn transcript() -> TranscriptSnapshot {
        let mut transcript = Transcript::new();
        let first = transcript.append_turn("hi");
        transcript
            .append_to_turn(first, &Fragment::new("Hello", "kb.pdf"), SourcePolicy::default())
            .unwrap();
        transcript.append_turn("bye");
        transcript.snapshot()
    }

    #[test]
    fn test_format_transcript() {
        plain();
        let output = ConsoleFormatter::format_transcript(&transcript());

        assert!(output.contains("you> hi\nbot> Hello\n"));
        assert!(output.contains("source: kb.pdf"));
        assert!(output.contains("you> bye\nbot> (waiting for response)"));
    }

    #[test]
    fn test_format_empty_transcript() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_transcript(&TranscriptSnapshot::default()),
            "(no messages yet)\n"
        );
    }

    #[test]
    fn test_format_file_list() {
        plain();
        let output = ConsoleFormatter::format_file_list(&["a.pdf".into(), "b.txt".into()]);
        assert_eq!(output, "Files: (2)\n  * a.pdf\n  * b.txt\n");
        assert_eq!(
            ConsoleFormatter::format_file_list(&[]),
            "(no files uploaded)\n"
        );
    }

    #[test]
    fn test_format_file_change() {
        plain();
        let change = FileChange {
            ack: FileAck::new(serde_json::json!({"message": "File deleted"})),
            files: vec!["b.txt".into()],
        };
        let output = ConsoleFormatter::format_file_change(&change);
        assert!(output.starts_with("v File deleted\n"));
        assert!(output.contains("* b.txt"));
    }

    #[test]
    fn test_format_status() {
        plain();
        let output = ConsoleFormatter::format_status(
            ConnectionState::Open,
            "ws://localhost:8000/chatbot",
            &ChatBehavior::default(),
            3,
        );
        assert!(output.contains("Connection: open"));
        assert!(output.contains("Endpoint: ws://localhost:8000/chatbot"));
        assert!(output.contains("Protocol: structured"));
        assert!(output.contains("Turns: 3"));
    }

    #[test]
    fn test_help_lists_every_command() {
        plain();
        let help = ConsoleFormatter::format_help();
        for command in [
            "/help", "/files", "/upload", "/delete", "/status", "/transcript", "/reconnect",
            "/quit",
        ] {
            assert!(help.contains(command), "missing {}", command);
        }
    }
}
