//! Catalog documents, index schema and bulk-load reporting

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// Stop-word lists applied by the multilingual analyzer
pub const STOPWORD_LANGUAGES: &[&str] = &[
    "_english_",
    "_french_",
    "_german_",
    "_spanish_",
    "_italian_",
];

/// A catalog entry as stored in the index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_note: Option<String>,
}

impl Document {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Read a JSON array of documents
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn analyzed_text() -> Value {
    json!({
        "type": "text",
        "analyzer": "multilingual_analyzer",
        "fields": { "keyword": { "type": "keyword", "ignore_above": 256 } }
    })
}

/// Index settings and mappings for the catalog
pub fn index_definition() -> Value {
    json!({
        "settings": {
            "analysis": {
                "analyzer": {
                    "multilingual_analyzer": {
                        "type": "standard",
                        "stopwords": STOPWORD_LANGUAGES
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "integer" },
                "title": analyzed_text(),
                "content": analyzed_text(),
                "description": analyzed_text(),
                "keywords": analyzed_text(),
                "language": { "type": "keyword" },
                "category": { "type": "keyword" },
                "subcategory": { "type": "keyword" },
                "brand": { "type": "keyword" },
                "url": { "type": "keyword" },
                "tags": { "type": "keyword" },
                "price_note": { "type": "text" }
            }
        }
    })
}

/// One document the engine refused during a bulk load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItemFailure {
    /// Position of the document in the submitted batch
    pub position: usize,
    pub status: u16,
    pub reason: String,
}

/// Outcome of a bulk load; failures don't abort the batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub indexed: usize,
    pub failures: Vec<BulkItemFailure>,
}

impl BulkReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
