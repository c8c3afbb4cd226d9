//! searchfront: a small HTTP front-end for an Elasticsearch-compatible
//! full-text search engine.
//!
//! Seven search modes (basic, fuzzy, language, brand, prefix, multilingual,
//! spelling correction) are mapped to structured engine queries and the
//! engine's hits are normalized into one JSON response shape.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engine::{ElasticClient, SearchBackend};
pub use error::{EngineError, SearchError, ValidationError};
pub use query::{SearchInputs, SearchMode};
pub use results::{ResultItem, SearchResponse};
pub use search::SearchFacade;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
