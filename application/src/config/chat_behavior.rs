//! Chat behavior configuration.

use streamchat_domain::{EmptySubmissionPolicy, ProtocolVariant, SourcePolicy};

/// Controls how the chat core behaves at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatBehavior {
    /// Inbound frame format expected from the backend.
    pub protocol: ProtocolVariant,
    /// Reaction to blank submissions.
    pub empty_submission: EmptySubmissionPolicy,
    /// How fragment sources update a turn's recorded source.
    pub source_policy: SourcePolicy,
}

impl ChatBehavior {
    pub fn with_protocol(mut self, protocol: ProtocolVariant) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_empty_submission(mut self, policy: EmptySubmissionPolicy) -> Self {
        self.empty_submission = policy;
        self
    }

    pub fn with_source_policy(mut self, policy: SourcePolicy) -> Self {
        self.source_policy = policy;
        self
    }
}
