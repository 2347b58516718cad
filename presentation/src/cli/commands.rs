//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use streamchat_domain::{EmptySubmissionPolicy, ProtocolVariant, SourcePolicy};

/// Inbound frame format spoken by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    /// Raw text chunks
    Plain,
    /// JSON objects with `response` and `source`
    Structured,
}

impl From<ProtocolArg> for ProtocolVariant {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Plain => ProtocolVariant::Plain,
            ProtocolArg::Structured => ProtocolVariant::Structured,
        }
    }
}

/// How a fragment's source updates the shown source
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourcePolicyArg {
    /// Empty sources keep the previous one
    KeepOnEmpty,
    /// Every fragment replaces the source
    Overwrite,
}

impl From<SourcePolicyArg> for SourcePolicy {
    fn from(arg: SourcePolicyArg) -> Self {
        match arg {
            SourcePolicyArg::KeepOnEmpty => SourcePolicy::KeepOnEmpty,
            SourcePolicyArg::Overwrite => SourcePolicy::Overwrite,
        }
    }
}

/// Reaction to a blank message
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmptySubmissionArg {
    Ignore,
    Alert,
}

impl From<EmptySubmissionArg> for EmptySubmissionPolicy {
    fn from(arg: EmptySubmissionArg) -> Self {
        match arg {
            EmptySubmissionArg::Ignore => EmptySubmissionPolicy::Ignore,
            EmptySubmissionArg::Alert => EmptySubmissionPolicy::Alert,
        }
    }
}

/// CLI arguments for streamchat
#[derive(Parser, Debug)]
#[command(name = "streamchat")]
#[command(author, version, about = "Terminal client for a streaming retrieval chatbot")]
#[command(long_about = r#"
streamchat connects to a chatbot backend over a WebSocket, streams each
response into the transcript as it arrives, and manages the backend's
knowledge files over HTTP.

Configuration files are loaded from (in priority order):
1. STREAMCHAT_<SECTION>__<KEY>   Environment overrides
2. --config <path>               Explicit config file
3. ./streamchat.toml             Project-level config
4. ~/.config/streamchat/config.toml   Global config

Example:
  streamchat
  streamchat --base-url https://bot.example.com --protocol plain
  streamchat -vv --conversation-log chat.jsonl
"#)]
pub struct Cli {
    /// HTTP base URL of the backend (the chat socket is derived from it)
    #[arg(short, long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Inbound frame format
    #[arg(short, long, value_enum)]
    pub protocol: Option<ProtocolArg>,

    /// How fragment sources update a response's source
    #[arg(long, value_enum)]
    pub source_policy: Option<SourcePolicyArg>,

    /// Reaction to blank messages
    #[arg(long, value_enum)]
    pub empty_submission: Option<EmptySubmissionArg>,

    /// Write conversation events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the waiting spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}
