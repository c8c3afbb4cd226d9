//! Elasticsearch-compatible REST backend

use super::traits::{EngineInfo, RawSearchResponse, SearchBackend};
use crate::catalog::{BulkItemFailure, BulkReport, Document};
use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::network::{EngineRequest, EngineResponse, HttpClient};
use crate::query::QueryRequest;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Client for a single engine node
#[derive(Clone)]
pub struct ElasticClient {
    http: HttpClient,
    base: Url,
    authorization: Option<String>,
}

impl ElasticClient {
    /// Create a client for the node configured in `settings`
    pub fn new(settings: &EngineSettings, http: HttpClient) -> Result<Self, EngineError> {
        let mut base = Url::parse(&settings.node)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let authorization = if let Some(ref key) = settings.api_key {
            Some(format!("ApiKey {}", key))
        } else {
            settings.username.as_ref().map(|user| {
                let password = settings.password.as_deref().unwrap_or_default();
                format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password)))
            })
        };

        Ok(Self {
            http,
            base,
            authorization,
        })
    }

    /// Node base URL
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<String, EngineError> {
        Ok(self.base.join(path)?.to_string())
    }

    async fn send(&self, mut request: EngineRequest) -> Result<EngineResponse, EngineError> {
        if let Some(ref auth) = self.authorization {
            request = request.header("Authorization", auth.clone());
        }
        debug!("{:?} {}", request.method, request.url);
        Ok(self.http.execute(request).await?)
    }

    /// Send a request and fail on any non-2xx answer
    async fn send_checked(&self, request: EngineRequest) -> Result<EngineResponse, EngineError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(EngineError::Status {
                status: response.status,
                reason: error_reason(&response),
            })
        }
    }

    /// Whether `index` exists
    pub async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let response = self.send(EngineRequest::head(self.endpoint(index)?)).await?;
        if response.is_success() {
            Ok(true)
        } else if response.is_not_found() {
            Ok(false)
        } else {
            Err(EngineError::Status {
                status: response.status,
                reason: error_reason(&response),
            })
        }
    }

    /// Create `index` from `definition` unless it already exists.
    /// Returns true when the index was created.
    pub async fn ensure_index(&self, index: &str, definition: &Value) -> Result<bool, EngineError> {
        if self.index_exists(index).await? {
            info!("Index {} already exists", index);
            return Ok(false);
        }

        let request = EngineRequest::put(self.endpoint(index)?).json(definition.clone());
        self.send_checked(request).await?;
        info!("Index {} created successfully", index);
        Ok(true)
    }

    /// Bulk-index `documents` into `index` and refresh it.
    /// Individual item failures are reported, not raised.
    pub async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkReport, EngineError> {
        if documents.is_empty() {
            return Ok(BulkReport::default());
        }

        let mut body = String::new();
        for document in documents {
            body.push_str(&serde_json::to_string(
                &serde_json::json!({ "index": { "_index": index } }),
            )?);
            body.push('\n');
            body.push_str(&serde_json::to_string(document)?);
            body.push('\n');
        }

        let request = EngineRequest::post(self.endpoint("_bulk")?)
            .param("refresh", "true")
            .ndjson(body);
        let response = self.send_checked(request).await?;
        let parsed: BulkResponse = response.json()?;

        let failures: Vec<BulkItemFailure> = parsed
            .items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let result = item.values().next()?;
                let error = result.error.as_ref()?;
                Some(BulkItemFailure {
                    position,
                    status: result.status,
                    reason: describe_error(error),
                })
            })
            .collect();

        for failure in &failures {
            warn!(
                "Error indexing document {}: {}",
                failure.position, failure.reason
            );
        }

        Ok(BulkReport {
            indexed: documents.len().saturating_sub(failures.len()),
            failures,
        })
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn probe(&self) -> Result<EngineInfo, EngineError> {
        let response = self
            .send_checked(EngineRequest::get(self.base.to_string()))
            .await?;
        Ok(response.json()?)
    }

    async fn query(
        &self,
        index: &str,
        request: &QueryRequest,
    ) -> Result<RawSearchResponse, EngineError> {
        let url = self.endpoint(&format!("{}/_search", index))?;
        let response = self
            .send_checked(EngineRequest::post(url).json(request.to_body()?))
            .await?;
        Ok(response.json()?)
    }
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    items: Vec<std::collections::HashMap<String, BulkItemResult>>,
}

#[derive(Debug, Deserialize)]
struct BulkItemResult {
    #[serde(default)]
    status: u16,
    #[serde(default)]
    error: Option<Value>,
}

/// Best-effort human-readable reason from an engine error body
fn error_reason(response: &EngineResponse) -> String {
    match response.json::<Value>() {
        Ok(body) => match body.get("error") {
            Some(error) => describe_error(error),
            None => response.text.clone(),
        },
        Err(_) if response.text.is_empty() => format!("HTTP {}", response.status),
        Err(_) => response.text.clone(),
    }
}

fn describe_error(error: &Value) -> String {
    if let Some(text) = error.as_str() {
        return text.to_string();
    }
    let kind = error.get("type").and_then(Value::as_str);
    let reason = error.get("reason").and_then(Value::as_str);
    match (kind, reason) {
        (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
        (Some(kind), None) => kind.to_string(),
        (None, Some(reason)) => reason.to_string(),
        (None, None) => error.to_string(),
    }
}
