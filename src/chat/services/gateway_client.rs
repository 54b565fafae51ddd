use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::chat_backend::{BoxFuture, ChatBackend};
use super::error::{GatewayError, GatewayResult};
use super::gateway_types::{
    ChatRequest, ChatResponse, CurrentModelResponse, DeleteDocumentRequest, DocumentListResponse,
    HealthResponse, KbStatsResponse, ModelListResponse, ModelSwitchRequest, StatusResponse,
    UploadResponse,
};

/// Request timeout in seconds. The Gateway has no streaming endpoints, so a
/// slow generation either completes within this window or is reported as
/// unreachable.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Gateway backend.
///
/// One logical request per operation: no retries, no backoff. Every
/// non-2xx response becomes [`GatewayError::Rejected`] carrying the server's
/// `detail` message when the body has one; failures with no response at all
/// become [`GatewayError::Unreachable`].
pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::InitializationError {
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        handle_response(response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        handle_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        handle_response(response).await
    }

    /// List all available models on the backend.
    pub async fn list_models(&self) -> GatewayResult<ModelListResponse> {
        self.get("/models/list").await
    }

    /// Switch the backend's active LLM.
    pub async fn switch_model(&self, model_name: impl Into<String>) -> GatewayResult<StatusResponse> {
        let request = ModelSwitchRequest {
            model_name: model_name.into(),
        };
        self.post_json("/models/switch", &request).await
    }

    /// The model currently serving chat requests.
    pub async fn current_model(&self) -> GatewayResult<CurrentModelResponse> {
        self.get("/models/current").await
    }

    /// List documents in the knowledge base.
    pub async fn list_documents(&self) -> GatewayResult<DocumentListResponse> {
        self.get("/documents").await
    }

    /// Upload a document for ingestion (multipart).
    pub async fn upload_document(&self, path: &Path) -> GatewayResult<UploadResponse> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        debug!(filename = %filename, size = bytes.len(), "Uploading document");

        let form =
            multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(filename));

        let response = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        handle_response(response).await
    }

    /// Remove one document from the knowledge base.
    pub async fn delete_document(&self, filename: impl Into<String>) -> GatewayResult<StatusResponse> {
        let request = DeleteDocumentRequest {
            filename: filename.into(),
        };

        let response = self
            .client
            .delete(self.endpoint("/documents/delete"))
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        handle_response(response).await
    }

    /// Remove every document from the knowledge base.
    pub async fn clear_documents(&self) -> GatewayResult<StatusResponse> {
        self.post("/documents/clear").await
    }

    pub async fn save_knowledge_base(&self) -> GatewayResult<StatusResponse> {
        self.post("/kb/save").await
    }

    pub async fn load_knowledge_base(&self) -> GatewayResult<StatusResponse> {
        self.post("/kb/load").await
    }

    pub async fn stats(&self) -> GatewayResult<KbStatsResponse> {
        self.get("/kb/stats").await
    }

    pub async fn health(&self) -> GatewayResult<HealthResponse> {
        self.get("/health").await
    }
}

impl ChatBackend for GatewayClient {
    fn chat(&self, request: ChatRequest) -> BoxFuture<'static, GatewayResult<ChatResponse>> {
        let client = self.client.clone();
        let url = self.endpoint("/chat");

        Box::pin(async move {
            let response = client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(GatewayError::Unreachable)?;

            handle_response(response).await
        })
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_detail(&body)
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<T>().await.map_err(GatewayError::InvalidResponse)
}

/// Pull the server's `detail` field out of an error body, when it is there.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_error_body() {
        let body = r#"{"detail": "Model 'nope' not found"}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("Model 'nope' not found"));
    }

    #[test]
    fn test_extract_detail_ignores_non_string_detail() {
        let body = r#"{"detail": [{"loc": ["body", "message"]}]}"#;
        assert!(extract_detail(body).is_none());
    }

    #[test]
    fn test_extract_detail_handles_empty_body() {
        assert!(extract_detail("").is_none());
        assert!(extract_detail("<html>Internal Server Error</html>").is_none());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = GatewayClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint("/chat"), "http://localhost:8000/chat");
    }
}
