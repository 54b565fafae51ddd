pub mod message;
pub mod session;
pub mod session_store;

pub use message::{ChatMessage, Role};
pub use session::{ChatSession, DEFAULT_TITLE};
pub use session_store::SessionStore;
