//! CLI entrypoint for streamchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use streamchat_application::{
    ChatSession, ConversationLogger, ManageFilesUseCase, NoConversationLogger,
    transport_event_channel,
};
use streamchat_infrastructure::{
    ConfigLoader, FileConfig, HttpFileStore, JsonlConversationLogger, WsChatTransport,
};
use streamchat_presentation::{ChatView, Cli, ConsoleSurface, FilePanel};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting streamchat");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let behavior = config.chat.to_behavior();
    let endpoint = config.backend.chat_endpoint()?;
    let http_base = config.backend.http_base()?;

    // === Dependency Injection ===
    let conversation_logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log
    {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => {
                warn!("Conversation logging disabled");
                Arc::new(NoConversationLogger)
            }
        },
        None => Arc::new(NoConversationLogger),
    };

    // Chat transport and its event queue
    let (events_tx, events_rx) = transport_event_channel();
    let transport = WsChatTransport::new(behavior.protocol, events_tx)
        .with_connect_timeout(Duration::from_secs(config.backend.connect_timeout_seconds))
        .with_conversation_logger(conversation_logger.clone());

    // Knowledge-file panel
    let file_store = HttpFileStore::new(http_base)?;
    let files = FilePanel::new(ManageFilesUseCase::new(Arc::new(file_store)));

    let session = ChatSession::new(Arc::new(transport), events_rx, endpoint)
        .with_behavior(behavior)
        .with_conversation_logger(conversation_logger);

    let view = ChatView::new(session, files, ConsoleSurface::stdout(!cli.quiet));
    let transcript = view.run().await?;

    info!("Session ended after {} turns", transcript.len());
    Ok(())
}

/// Command-line flags take precedence over every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    if let Some(protocol) = cli.protocol {
        config.chat.protocol = protocol.into();
    }
    if let Some(policy) = cli.source_policy {
        config.chat.source_policy = policy.into();
    }
    if let Some(policy) = cli.empty_submission {
        config.chat.empty_submission = policy.into();
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamchat_domain::{ProtocolVariant, SourcePolicy};

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "streamchat",
            "--base-url",
            "https://bot.example.com",
            "--protocol",
            "plain",
            "--source-policy",
            "overwrite",
            "--conversation-log",
            "chat.jsonl",
        ])
        .unwrap();
        let mut config = FileConfig::default();

        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.backend.base_url, "https://bot.example.com");
        assert_eq!(config.chat.protocol, ProtocolVariant::Plain);
        assert_eq!(config.chat.source_policy, SourcePolicy::Overwrite);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("chat.jsonl"))
        );
        assert_eq!(
            config.backend.chat_endpoint().unwrap(),
            "wss://bot.example.com/chatbot"
        );
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["streamchat"]).unwrap();
        let mut config = FileConfig::default();

        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config, FileConfig::default());
    }
}
