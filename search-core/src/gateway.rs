//! Gateway client for the remote ranking service.
//!
//! The service exposes two operations, `POST /query` and `POST /ingest`, plus a
//! descriptive root endpoint. Every call is single-shot: no retries, no caching,
//! no request deduplication.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{IngestionReport, QueryRequest, SearchResponse, ServiceInfo, Upload};
use crate::{Config, Error, Result};

const QUERY_PATH: &str = "/query";
const INGEST_PATH: &str = "/ingest";
const ROOT_PATH: &str = "/";

/// Remote operations the query state machine depends on.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Rank chunks against `query`. Callers pass trimmed, non-empty text.
    async fn search(&self, query: &str) -> Result<SearchResponse>;

    /// Upload a dataset for ingestion.
    async fn ingest(&self, upload: Upload) -> Result<IngestionReport>;
}

/// HTTP client for the ranking service.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http_client: reqwest::Client,
    config: Config,
}

impl GatewayClient {
    /// Create a new gateway client for the configured endpoint.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the service description from the root endpoint.
    pub async fn info(&self) -> Result<ServiceInfo> {
        let url = self.config.endpoint(ROOT_PATH)?;
        self.send(self.http_client.get(url), ROOT_PATH).await
    }

    /// Send a request and decode a JSON body, classifying failures.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response from {}: {}", path, e)))?;

        debug!(path, status = status.as_u16(), bytes = body.len(), "Received response");

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(path, status = status.as_u16(), detail = ?detail, "Service returned an error");
            return Err(Error::Service {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| Error::Decode(format!("Unexpected response from {}: {}", path, e)))
    }
}

#[async_trait]
impl SearchGateway for GatewayClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = self.config.endpoint(QUERY_PATH)?;
        let payload = QueryRequest {
            query: query.to_string(),
        };

        info!(query, "Dispatching search");
        let response: SearchResponse = self
            .send(self.http_client.post(url).json(&payload), QUERY_PATH)
            .await?;

        info!(results = response.results.len(), "Search completed");
        Ok(response)
    }

    async fn ingest(&self, upload: Upload) -> Result<IngestionReport> {
        let url = self.config.endpoint(INGEST_PATH)?;
        let content_type = content_type_for(&upload.filename);

        info!(
            filename = %upload.filename,
            bytes = upload.bytes.len(),
            "Uploading dataset"
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        self.send(self.http_client.post(url).multipart(form), INGEST_PATH)
            .await
    }
}

/// Pull a string `detail` field out of an error body, if there is one.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(String::from)
}

fn content_type_for(filename: &str) -> &'static str {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".csv") {
        "text/csv"
    } else if lower.ends_with(".json") {
        "application/json"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
