use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, Role};

/// Title shown for a session with no messages yet.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Titles derive from the first user message, cut at this many characters.
const TITLE_MAX_CHARS: usize = 30;

/// One persisted conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    id: String,
    title: String,
    messages: Vec<ChatMessage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty session with the given id.
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message. Prior messages are never edited in place; the title
    /// is re-derived and `updated_at` advances on every append.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.title = derive_title(&self.messages);
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Derive a session title from the first user message: the first 30
/// characters, plus an ellipsis when the message is longer.
fn derive_title(messages: &[ChatMessage]) -> String {
    let first_user = messages.iter().find(|m| m.role == Role::User);
    match first_user {
        Some(msg) => {
            let truncated: String = msg.text.chars().take(TITLE_MAX_CHARS).collect();
            if msg.text.chars().count() > TITLE_MAX_CHARS {
                format!("{}...", truncated)
            } else {
                truncated
            }
        }
        None => DEFAULT_TITLE.to_string(),
    }
}
