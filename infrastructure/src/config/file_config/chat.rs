//! Chat behavior configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};
use streamchat_application::ChatBehavior;
use streamchat_domain::{EmptySubmissionPolicy, ProtocolVariant, SourcePolicy};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Inbound frame format: "plain" or "structured"
    pub protocol: ProtocolVariant,
    /// Blank submissions: "ignore" or "alert"
    pub empty_submission: EmptySubmissionPolicy,
    /// Fragment sources: "keep_on_empty" or "overwrite"
    pub source_policy: SourcePolicy,
}

impl FileChatConfig {
    pub fn to_behavior(&self) -> ChatBehavior {
        ChatBehavior::default()
            .with_protocol(self.protocol)
            .with_empty_submission(self.empty_submission)
            .with_source_policy(self.source_policy)
    }
}
