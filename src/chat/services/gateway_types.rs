//! Wire types for the Gateway HTTP API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub use_rag: bool,
    pub top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default = "default_true")]
    pub context_used: bool,
    #[serde(default)]
    pub model_used: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    #[serde(default)]
    pub current_llm: Option<String>,
    #[serde(default)]
    pub current_embedding: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSwitchRequest {
    pub model_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentModelResponse {
    pub llm_model: String,
    #[serde(default)]
    pub embedding_model: Option<String>,
}

/// Generic acknowledgement used by switch/delete/clear/save/load endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub chunks: u64,
    #[serde(default)]
    pub upload_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub documents: Vec<DocumentInfo>,
    pub total_documents: u64,
    pub total_chunks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteDocumentRequest {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: String,
    pub filename: String,
    pub chunks_created: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KbStats {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub total_chunks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KbStatsResponse {
    #[serde(default)]
    pub status: String,
    pub stats: KbStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub models: HashMap<String, String>,
    #[serde(default)]
    pub vector_store_size: u64,
}
