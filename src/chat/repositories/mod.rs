pub mod error;
pub mod in_memory_repository;
pub mod session_json_repository;
pub mod session_repository;

pub use error::{RepositoryError, RepositoryResult};
pub use in_memory_repository::InMemorySessionRepository;
pub use session_json_repository::JsonSessionRepository;
pub use session_repository::SessionRepository;
