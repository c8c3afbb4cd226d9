//! Search backend trait and the raw engine response shapes

use crate::error::EngineError;
use crate::query::QueryRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Node information returned by a liveness probe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub version: EngineVersion,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineVersion {
    #[serde(default)]
    pub number: String,
}

/// Search response as returned by the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub hits: RawHits,
    /// Suggester name to suggestion entries
    #[serde(default)]
    pub suggest: Option<HashMap<String, Vec<RawSuggestion>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHits {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

/// One analysed span of the suggestion text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSuggestion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<RawSuggestionOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSuggestionOption {
    pub text: String,
    #[serde(default)]
    pub highlighted: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// The external search engine as seen by the facade and the connection manager
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Lightweight liveness probe
    async fn probe(&self) -> Result<EngineInfo, EngineError>;

    /// Run a query against `index`
    async fn query(
        &self,
        index: &str,
        request: &QueryRequest,
    ) -> Result<RawSearchResponse, EngineError>;
}
