//! Wire models for the ranking service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query request payload.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

/// A single ranked chunk returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Opaque chunk identifier
    pub chunk_id: String,
    /// Position of the chunk within its source document
    pub chunk_index: u32,
    /// Chunk text
    pub text: String,
    /// Relevance of the chunk to the query, higher is better
    pub similarity_score: f64,
    /// Source document, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Query response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Results in relevance order
    pub results: Vec<SearchResult>,
    /// Query echoed back by the service
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub num_results: Option<usize>,
}

/// Ingestion report, passed through to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngestionReport(pub Value);

impl IngestionReport {
    pub fn num_documents(&self) -> Option<u64> {
        self.0.get("num_documents").and_then(Value::as_u64)
    }

    pub fn num_chunks(&self) -> Option<u64> {
        self.0.get("num_chunks").and_then(Value::as_u64)
    }

    /// Embedding cost in USD, if reported.
    pub fn cost(&self) -> Option<f64> {
        self.0.get("cost").and_then(Value::as_f64)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Root endpoint payload describing the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
}

/// A file to upload for ingestion.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read an upload from disk, naming it after the file.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self { filename, bytes })
    }
}
