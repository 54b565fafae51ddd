use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message inside a chat session.
///
/// Messages are immutable once appended to a session; the optional fields
/// only appear on assistant messages that carried retrieval metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_used: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

impl ChatMessage {
    /// Build a user message stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            context_used: None,
            model_used: None,
        }
    }

    /// Build an assistant message carrying the backend's retrieval metadata.
    pub fn assistant(
        text: impl Into<String>,
        sources: Vec<String>,
        context_used: Option<bool>,
        model_used: Option<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            sources,
            context_used,
            model_used,
        }
    }
}
