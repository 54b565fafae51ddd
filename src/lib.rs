//! Conversation core for the LoLA desktop chat client.
//!
//! Owns the local chat session store (creation, persistence, deletion, the
//! active-session pointer) and its synchronization with the remote
//! retrieval/chat backend. The presentation layer renders snapshots from
//! [`ChatController`] and issues actions against it.

pub mod chat;
pub mod config;

pub use chat::controllers::{ChatController, ChatError, SendOptions};
pub use chat::models::{ChatMessage, ChatSession, Role, SessionStore};
pub use chat::repositories::{InMemorySessionRepository, JsonSessionRepository, SessionRepository};
pub use chat::services::{ChatBackend, GatewayClient, GatewayError};
pub use config::Config;
