use std::future::Future;
use std::pin::Pin;

use super::error::GatewayResult;
use super::gateway_types::{ChatRequest, ChatResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The one Gateway operation the chat turn loop depends on.
///
/// The controller consumes this trait rather than the concrete HTTP client
/// so tests can substitute a scripted backend.
pub trait ChatBackend: Send + Sync + 'static {
    fn chat(&self, request: ChatRequest) -> BoxFuture<'static, GatewayResult<ChatResponse>>;
}
