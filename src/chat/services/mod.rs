pub mod chat_backend;
pub mod error;
pub mod gateway_client;
pub mod gateway_types;

pub use chat_backend::ChatBackend;
pub use error::{GatewayError, GatewayResult};
pub use gateway_client::GatewayClient;
pub use gateway_types::{ChatRequest, ChatResponse};
