use std::sync::Arc;

use parking_lot::Mutex;

use super::error::RepositoryResult;
use super::session_repository::{BoxFuture, SessionRepository};
use crate::chat::models::ChatSession;

/// In-memory repository for chat sessions.
/// Useful for testing and development.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<Vec<ChatSession>>>,
    current_id: Arc<Mutex<Option<String>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn load_sessions(&self) -> BoxFuture<'static, RepositoryResult<Vec<ChatSession>>> {
        let sessions = self.sessions.clone();

        Box::pin(async move { Ok(sessions.lock().clone()) })
    }

    fn save_sessions(&self, new_sessions: Vec<ChatSession>) -> BoxFuture<'static, RepositoryResult<()>> {
        let sessions = self.sessions.clone();

        Box::pin(async move {
            *sessions.lock() = new_sessions;
            Ok(())
        })
    }

    fn load_current_id(&self) -> BoxFuture<'static, RepositoryResult<Option<String>>> {
        let current_id = self.current_id.clone();

        Box::pin(async move { Ok(current_id.lock().clone()) })
    }

    fn save_current_id(&self, id: Option<String>) -> BoxFuture<'static, RepositoryResult<()>> {
        let current_id = self.current_id.clone();

        Box::pin(async move {
            *current_id.lock() = id;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = InMemorySessionRepository::new();

        repo.save_sessions(vec![ChatSession::new("test-1".to_string())])
            .await
            .unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "test-1");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemorySessionRepository::new();
        let other = repo.clone();

        repo.save_current_id(Some("s-1".to_string())).await.unwrap();

        assert_eq!(other.load_current_id().await.unwrap().as_deref(), Some("s-1"));
    }
}
