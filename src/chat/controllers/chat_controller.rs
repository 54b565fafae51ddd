use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::chat::models::{ChatMessage, ChatSession, SessionStore};
use crate::chat::repositories::SessionRepository;
use crate::chat::services::{ChatBackend, ChatRequest, GatewayError};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("a request is already in flight for this session")]
    Busy,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ChatError {
    /// The message the presentation layer should show inline. Transport
    /// failures get the generic "is the backend running" text; rejections
    /// keep the server-supplied reason.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyMessage => "Message cannot be empty".to_string(),
            ChatError::Busy => "A response is still pending for this chat".to_string(),
            ChatError::Gateway(GatewayError::Rejected { message, .. }) => message.clone(),
            ChatError::Gateway(_) => {
                "Failed to get response. Check if backend is running.".to_string()
            }
        }
    }
}

/// Per-turn options forwarded to the Gateway chat call.
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub use_rag: bool,
    pub top_k: u32,
    pub model: Option<String>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            use_rag: true,
            top_k: 3,
            model: None,
        }
    }
}

/// Mediates between UI actions and the session store, the repository, and
/// the Gateway.
///
/// The controller guarantees that the active-session pointer always resolves
/// to an existing session: after `init` there is always an active session,
/// and every operation that could leave the pointer dangling re-resolves it
/// (or creates a fresh session) before returning.
///
/// The store mutex is only held for short synchronous sections, never across
/// an await.
pub struct ChatController {
    store: Mutex<SessionStore>,
    repository: Arc<dyn SessionRepository>,
    backend: Arc<dyn ChatBackend>,
    /// Session ids with a chat request currently in flight. A second send
    /// for the same session is rejected with [`ChatError::Busy`].
    in_flight: Mutex<HashSet<String>>,
}

impl ChatController {
    /// Load persisted state and resolve the active session.
    ///
    /// The persisted pointer wins when it still names an existing session;
    /// otherwise the newest session becomes active; an empty store gets a
    /// fresh session immediately.
    pub async fn init(
        repository: Arc<dyn SessionRepository>,
        backend: Arc<dyn ChatBackend>,
    ) -> Self {
        let sessions = repository.load_sessions().await.unwrap_or_else(|e| {
            warn!(error = ?e, "Failed to load sessions, starting empty");
            Vec::new()
        });
        let persisted_id = repository.load_current_id().await.unwrap_or_else(|e| {
            warn!(error = ?e, "Failed to load current-session pointer");
            None
        });

        info!(count = sessions.len(), "Loaded chat sessions");

        let controller = Self {
            store: Mutex::new(SessionStore::new()),
            repository,
            backend,
            in_flight: Mutex::new(HashSet::new()),
        };

        controller.store.lock().replace_all(sessions, None);
        controller.resolve_active(persisted_id).await;

        controller
    }

    /// Create a new empty session, make it active, persist immediately.
    pub async fn new_chat(&self) -> ChatSession {
        let session = ChatSession::new(Uuid::new_v4().to_string());
        info!(session_id = %session.id(), "Creating new chat");

        {
            let mut store = self.store.lock();
            store.upsert(session.clone());
            store.set_active_id(Some(session.id().to_string()));
        }

        self.persist_sessions().await;
        self.persist_current(Some(session.id().to_string())).await;

        session
    }

    /// Switch the active session. Unknown ids are a silent no-op (the
    /// pointer is unchanged) since the UI only ever offers valid ids.
    pub async fn load_chat(&self, id: &str) -> bool {
        let found = {
            let mut store = self.store.lock();
            if store.get(id).is_some() {
                store.set_active_id(Some(id.to_string()));
                true
            } else {
                false
            }
        };

        if found {
            self.persist_current(Some(id.to_string())).await;
        } else {
            debug!(session_id = %id, "load_chat ignored unknown session id");
        }

        found
    }

    /// Delete a session. Idempotent; deleting the active session re-points
    /// at the newest remaining session, or creates a fresh one when none
    /// remain.
    pub async fn delete_chat(&self, id: &str) {
        // `next` is set only when the active pointer needs re-resolution:
        // Some(Some(id)) re-points, Some(None) means the store went empty.
        let (removed, next) = {
            let mut store = self.store.lock();
            let removed = store.remove(id);

            let next = if store.active_id() == Some(id) {
                let next = store.sessions().first().map(|s| s.id().to_string());
                store.set_active_id(next.clone());
                Some(next)
            } else {
                None
            };

            (removed, next)
        };

        if removed {
            info!(session_id = %id, "Deleted chat");
            self.persist_sessions().await;
        }

        match next {
            Some(Some(next_id)) => self.persist_current(Some(next_id)).await,
            Some(None) => {
                self.new_chat().await;
            }
            None => {}
        }
    }

    /// The central turn operation: append the user message optimistically,
    /// call the Gateway, append the assistant reply.
    ///
    /// On failure the user message is retained (no rollback) so the
    /// conversation shows the unanswered question.
    pub async fn send_message(
        &self,
        text: &str,
        options: SendOptions,
    ) -> Result<ChatMessage, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let active = self.store.lock().active_id().map(str::to_string);
        let session_id = match active {
            Some(id) => id,
            // Transient NoActiveSession state; resolved by creating one.
            None => self.new_chat().await.id().to_string(),
        };

        if !self.in_flight.lock().insert(session_id.clone()) {
            return Err(ChatError::Busy);
        }

        // Optimistic append: retained even when the gateway call fails.
        {
            let mut store = self.store.lock();
            if let Some(session) = store.get_mut(&session_id) {
                session.push(ChatMessage::user(text));
            }
        }
        self.persist_sessions().await;

        let request = ChatRequest {
            message: text.to_string(),
            use_rag: options.use_rag,
            top_k: options.top_k,
            model: options.model,
        };

        debug!(session_id = %session_id, use_rag = request.use_rag, "Sending chat request");
        let result = self.backend.chat(request).await;

        let outcome = match result {
            Ok(response) => {
                let message = ChatMessage::assistant(
                    response.answer,
                    response.sources,
                    Some(response.context_used),
                    response.model_used,
                );

                {
                    let mut store = self.store.lock();
                    match store.get_mut(&session_id) {
                        Some(session) => session.push(message.clone()),
                        None => {
                            warn!(session_id = %session_id,
                                  "Session deleted while request was in flight, dropping reply")
                        }
                    }
                }
                self.persist_sessions().await;

                Ok(message)
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Chat request failed");
                Err(ChatError::Gateway(e))
            }
        };

        self.in_flight.lock().remove(&session_id);
        outcome
    }

    /// Reload the index from disk and re-resolve the active pointer.
    /// Collaborators call this on demand instead of the store reloading
    /// behind a UI visibility event.
    pub async fn refresh(&self) {
        let sessions = self.repository.load_sessions().await.unwrap_or_else(|e| {
            warn!(error = ?e, "Failed to reload sessions");
            Vec::new()
        });

        let preferred = {
            let mut store = self.store.lock();
            let current = store.active_id().map(str::to_string);
            store.replace_all(sessions, None);
            current
        };

        self.resolve_active(preferred).await;
    }

    /// Snapshot of all sessions, newest-first.
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.store.lock().sessions().to_vec()
    }

    pub fn active_id(&self) -> Option<String> {
        self.store.lock().active_id().map(str::to_string)
    }

    pub fn active_session(&self) -> Option<ChatSession> {
        let store = self.store.lock();
        store.active_id().and_then(|id| store.get(id)).cloned()
    }

    /// Whether a chat request is in flight for the given session.
    pub fn is_busy(&self, session_id: &str) -> bool {
        self.in_flight.lock().contains(session_id)
    }

    /// Point the store at `preferred` when it still exists, else the newest
    /// session, else a freshly created one.
    async fn resolve_active(&self, preferred: Option<String>) {
        let resolved = {
            let mut store = self.store.lock();
            let id = preferred
                .filter(|id| store.get(id).is_some())
                .or_else(|| store.sessions().first().map(|s| s.id().to_string()));
            store.set_active_id(id.clone());
            id
        };

        match resolved {
            Some(id) => self.persist_current(Some(id)).await,
            None => {
                self.new_chat().await;
            }
        }
    }

    async fn persist_sessions(&self) {
        let sessions = self.store.lock().sessions().to_vec();
        if let Err(e) = self.repository.save_sessions(sessions).await {
            warn!(error = ?e, "Failed to persist sessions");
        }
    }

    async fn persist_current(&self, id: Option<String>) {
        if let Err(e) = self.repository.save_current_id(id).await {
            warn!(error = ?e, "Failed to persist current-session pointer");
        }
    }
}
