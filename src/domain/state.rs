// ============================================================
// Layer 3 — Conversation State
// ============================================================
// Everything the assistant remembers between two turns of one
// session. Each session owns its own value; the engine takes it
// in and hands back the updated copy, so nothing is shared
// between concurrent conversations.

use serde::{Deserialize, Serialize};

use crate::domain::topic::TopicCode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Topic of the last successfully resolved question
    pub last_topic: Option<TopicCode>,

    /// Free-form interest stated by the user, filled in by the
    /// hosting framework if it tracks one
    #[serde(default)]
    pub user_interest: Option<String>,
}

impl ConversationState {
    /// A cleared state, as at the start of a new session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interest(mut self, interest: impl Into<String>) -> Self {
        self.user_interest = Some(interest.into());
        self
    }

    pub fn last_topic(&self) -> Option<&TopicCode> {
        self.last_topic.as_ref()
    }
}
