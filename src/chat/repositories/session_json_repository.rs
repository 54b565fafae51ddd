use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::{RepositoryError, RepositoryResult};
use super::session_repository::{BoxFuture, SessionRepository};
use crate::chat::models::ChatSession;

/// JSON file-based repository for chat sessions.
///
/// Stores the session index in `sessions.json` and the current-session
/// pointer in `current_session.json` under the app config directory.
/// A malformed file is logged and treated as an empty store, never as a
/// hard failure.
pub struct JsonSessionRepository {
    sessions_path: PathBuf,
    current_path: PathBuf,
}

impl JsonSessionRepository {
    /// Create repository with XDG-compliant path (`~/.config/lola/`).
    pub fn new() -> RepositoryResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| RepositoryError::InitializationError {
            message: "Could not determine config directory".to_string(),
        })?;

        Ok(Self::with_dir(config_dir.join("lola")))
    }

    /// Create repository rooted at a custom directory (for testing).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            sessions_path: dir.join("sessions.json"),
            current_path: dir.join("current_session.json"),
        }
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.sessions_path.parent()
    }
}

/// Write `json` to `path` atomically (temp file + rename), creating the
/// parent directory on demand.
async fn write_atomic(path: &Path, json: String) -> RepositoryResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    Ok(())
}

impl SessionRepository for JsonSessionRepository {
    fn load_sessions(&self) -> BoxFuture<'static, RepositoryResult<Vec<ChatSession>>> {
        let path = self.sessions_path.clone();

        Box::pin(async move {
            // Missing file means first run
            if !path.exists() {
                return Ok(Vec::new());
            }

            let contents = tokio::fs::read_to_string(&path).await?;

            match serde_json::from_str::<Vec<ChatSession>>(&contents) {
                Ok(sessions) => Ok(sessions),
                Err(e) => {
                    warn!(path = %path.display(), error = %e,
                          "Session index is unreadable, treating as empty");
                    Ok(Vec::new())
                }
            }
        })
    }

    fn save_sessions(&self, sessions: Vec<ChatSession>) -> BoxFuture<'static, RepositoryResult<()>> {
        let path = self.sessions_path.clone();

        Box::pin(async move {
            let json = serde_json::to_string_pretty(&sessions)?;
            write_atomic(&path, json).await
        })
    }

    fn load_current_id(&self) -> BoxFuture<'static, RepositoryResult<Option<String>>> {
        let path = self.current_path.clone();

        Box::pin(async move {
            if !path.exists() {
                return Ok(None);
            }

            let contents = tokio::fs::read_to_string(&path).await?;

            match serde_json::from_str::<Option<String>>(&contents) {
                Ok(id) => Ok(id),
                Err(e) => {
                    warn!(path = %path.display(), error = %e,
                          "Current-session pointer is unreadable, treating as unset");
                    Ok(None)
                }
            }
        })
    }

    fn save_current_id(&self, id: Option<String>) -> BoxFuture<'static, RepositoryResult<()>> {
        let path = self.current_path.clone();

        Box::pin(async move {
            let json = serde_json::to_string(&id)?;
            write_atomic(&path, json).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::ChatMessage;

    fn repo(dir: &tempfile::TempDir) -> JsonSessionRepository {
        JsonSessionRepository::with_dir(dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        assert!(repo.load_sessions().await.unwrap().is_empty());
        assert!(repo.load_current_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_round_trip_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        let mut newest = ChatSession::new("newest".to_string());
        newest.push(ChatMessage::user("hello"));
        let sessions = vec![newest, ChatSession::new("oldest".to_string())];

        repo.save_sessions(sessions).await.unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id(), "newest");
        assert_eq!(loaded[0].title(), "hello");
        assert_eq!(loaded[1].id(), "oldest");
    }

    #[tokio::test]
    async fn test_current_id_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        repo.save_current_id(Some("s-1".to_string())).await.unwrap();
        assert_eq!(repo.load_current_id().await.unwrap().as_deref(), Some("s-1"));

        repo.save_current_id(None).await.unwrap();
        assert!(repo.load_current_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_session_index_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        std::fs::write(dir.path().join("sessions.json"), "{not json").unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_pointer_degrades_to_unset() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        std::fs::write(dir.path().join("current_session.json"), "???").unwrap();

        assert!(repo.load_current_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir);

        repo.save_sessions(vec![ChatSession::new("a".to_string())])
            .await
            .unwrap();
        repo.save_sessions(vec![ChatSession::new("b".to_string())])
            .await
            .unwrap();

        let loaded = repo.load_sessions().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "b");
    }
}
