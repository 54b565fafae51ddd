use std::future::Future;
use std::pin::Pin;

use super::error::RepositoryResult;
use crate::chat::models::ChatSession;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Repository trait for chat session persistence.
///
/// The persisted state is two keys: the full session index (stored in index
/// order, newest-first) and the current-session pointer. Writes always
/// replace the whole key; there is no per-session diffing.
pub trait SessionRepository: Send + Sync + 'static {
    /// Load all sessions from storage. Unreadable or malformed storage
    /// degrades to an empty index rather than an error where possible.
    fn load_sessions(&self) -> BoxFuture<'static, RepositoryResult<Vec<ChatSession>>>;

    /// Save the whole session index, in index order.
    fn save_sessions(&self, sessions: Vec<ChatSession>) -> BoxFuture<'static, RepositoryResult<()>>;

    /// Load the persisted current-session pointer.
    fn load_current_id(&self) -> BoxFuture<'static, RepositoryResult<Option<String>>>;

    /// Save the current-session pointer.
    fn save_current_id(&self, id: Option<String>) -> BoxFuture<'static, RepositoryResult<()>>;
}
