use super::session::ChatSession;

/// In-memory index of all chat sessions plus the active-session pointer.
///
/// The index is kept newest-first: creation prepends, updating an existing
/// session keeps its position. Setting the active pointer does not check that
/// the id exists — that validation belongs to the controller, which never
/// leaves the pointer dangling.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active_id: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions in index order (newest-first). Never fails.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    /// Upsert by id: replace in place when the session exists, prepend when
    /// it is new. Ids stay unique either way.
    pub fn upsert(&mut self, session: ChatSession) {
        match self.sessions.iter().position(|s| s.id() == session.id()) {
            Some(index) => self.sessions[index] = session,
            None => self.sessions.insert(0, session),
        }
    }

    /// Remove a session by id. Removing an unknown id is a no-op; the active
    /// pointer is left untouched for the controller to re-resolve.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id() != id);
        self.sessions.len() != before
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn set_active_id(&mut self, id: Option<String>) {
        self.active_id = id;
    }

    /// Wholesale refresh from persisted state.
    pub fn replace_all(&mut self, sessions: Vec<ChatSession>, active_id: Option<String>) {
        self.sessions = sessions;
        self.active_id = active_id;
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
