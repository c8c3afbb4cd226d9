//! Error types shared by the query, engine and search layers

use thiserror::Error;

/// A required input was missing for the requested search mode.
/// Raised before any engine call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Prefix parameter is required")]
    MissingPrefix,

    #[error("Both query (q) and language (lang) parameters are required")]
    MissingLanguage,

    #[error("Both query (q) and brand (brand) parameters are required")]
    MissingBrand,

    /// The query string could not be decoded into search parameters
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

/// Failure talking to the search engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered with a non-2xx status
    #[error("engine returned HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to decode engine response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid engine URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Error returned by the search facade
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("search engine failure: {0}")]
    Engine(#[from] EngineError),
}

impl SearchError {
    /// Stable, machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Engine(_) => "engine",
        }
    }
}
