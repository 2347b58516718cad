//! Slash commands understood by the chat view
//!
//! A line starting with `/` is a command. A line starting with `//` is chat
//! text with one slash removed, so `//usr/bin is where?` sends
//! `/usr/bin is where?`.

use std::path::PathBuf;

/// One input line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    /// Text to submit to the chatbot.
    Text(&'a str),
    Command(ReplCommand),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let body = line.trim_start();
        if body.starts_with("//") {
            return Self::Text(&body[1..]);
        }
        match ReplCommand::parse(line) {
            Some(command) => Self::Command(command),
            None => Self::Text(line),
        }
    }
}

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Files,
    Upload(PathBuf),
    Delete(String),
    Status,
    Transcript,
    Reconnect,
    Quit,
    /// Unknown command, or a known one with missing arguments.
    Unknown(String),
}

impl ReplCommand {
    /// Parse an input line.
    ///
    /// Returns `None` when the line is chat text rather than a command,
    /// including `//`-escaped text. Leading whitespace is ignored when looking
    /// for the slash, so `"  /quit"` is still a command.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.starts_with("//") {
            return None;
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match name {
            "/help" | "/h" | "/?" => Self::Help,
            "/files" | "/ls" => Self::Files,
            "/upload" if !rest.is_empty() => Self::Upload(PathBuf::from(rest)),
            "/delete" | "/rm" if !rest.is_empty() => Self::Delete(rest.to_string()),
            "/status" => Self::Status,
            "/transcript" => Self::Transcript,
            "/reconnect" => Self::Reconnect,
            "/quit" | "/exit" | "/q" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("hello"), None);
        assert_eq!(ReplCommand::parse(""), None);
        assert_eq!(ReplCommand::parse("   "), None);
        assert_eq!(ReplCommand::parse("what is a/b?"), None);
    }

    #[test]
    fn test_simple_commands_and_aliases() {
        assert_eq!(ReplCommand::parse("/help"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/ls"), Some(ReplCommand::Files));
        assert_eq!(ReplCommand::parse("/status"), Some(ReplCommand::Status));
        assert_eq!(ReplCommand::parse("/transcript"), Some(ReplCommand::Transcript));
        assert_eq!(ReplCommand::parse("/reconnect"), Some(ReplCommand::Reconnect));
        assert_eq!(ReplCommand::parse("  /q  "), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_upload_keeps_spaces_in_path() {
        assert_eq!(
            ReplCommand::parse("/upload ./docs/my notes.pdf"),
            Some(ReplCommand::Upload(PathBuf::from("./docs/my notes.pdf")))
        );
    }

    #[test]
    fn test_delete_takes_filename() {
        assert_eq!(
            ReplCommand::parse("/delete  report.pdf "),
            Some(ReplCommand::Delete("report.pdf".into()))
        );
    }

    #[test]
    fn test_missing_argument_is_unknown() {
        assert_eq!(
            ReplCommand::parse("/upload"),
            Some(ReplCommand::Unknown("/upload".into()))
        );
        assert_eq!(
            ReplCommand::parse("/delete   "),
            Some(ReplCommand::Unknown("/delete".into()))
        );
    }

    #[test]
    fn test_double_slash_sends_text() {
        assert_eq!(ReplCommand::parse("//usr/bin is where?"), None);
        assert_eq!(
            ReplInput::parse("//usr/bin is where?"),
            ReplInput::Text("/usr/bin is where?")
        );
        assert_eq!(ReplInput::parse("  //quit"), ReplInput::Text("/quit"));
        assert_eq!(ReplInput::parse("//"), ReplInput::Text("/"));
    }

    #[test]
    fn test_input_classification() {
        assert_eq!(ReplInput::parse(" hello "), ReplInput::Text(" hello "));
        assert_eq!(
            ReplInput::parse("/status"),
            ReplInput::Command(ReplCommand::Status)
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/models gpt"),
            Some(ReplCommand::Unknown("/models gpt".into()))
        );
    }
}
