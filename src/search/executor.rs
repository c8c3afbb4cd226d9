//! Search execution: validate, build, submit, normalize

use crate::engine::{check_connection, SearchBackend};
use crate::error::SearchError;
use crate::query::{SearchInputs, SearchMode};
use crate::results::{normalize, SearchResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs searches for every [`SearchMode`] against one backend and index
#[derive(Clone)]
pub struct SearchFacade {
    backend: Arc<dyn SearchBackend>,
    index: String,
}

impl SearchFacade {
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
        }
    }

    /// Run one search. Validation failures return before the engine is called;
    /// engine failures are returned as-is, without retry.
    pub async fn execute(
        &self,
        mode: SearchMode,
        inputs: &SearchInputs,
    ) -> Result<SearchResponse, SearchError> {
        let handler = mode.handler();
        let validated = (handler.validate)(inputs)?;
        let request = (handler.build)(&validated);

        debug!("Executing {} search for '{}'", mode, validated.text);
        let start = Instant::now();

        let raw = match self.backend.query(&self.index, &request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{} search for '{}' failed: {}", mode, validated.text, e);
                return Err(e.into());
            }
        };

        let response = normalize(raw, mode.suggests());
        info!(
            "{} search for '{}' returned {} results in {:?}",
            mode,
            validated.text,
            response.len(),
            start.elapsed()
        );
        Ok(response)
    }

    /// Full-text search, no fuzziness
    pub async fn search(&self, text: &str) -> Result<SearchResponse, SearchError> {
        self.execute(SearchMode::Basic, &SearchInputs::text(text))
            .await
    }

    /// Search tolerant of misspellings
    pub async fn fuzzy_search(&self, text: &str) -> Result<SearchResponse, SearchError> {
        self.execute(SearchMode::Fuzzy, &SearchInputs::text(text))
            .await
    }

    pub async fn language_search(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.execute(
            SearchMode::LanguageFiltered,
            &SearchInputs::text(text).with_language(language),
        )
        .await
    }

    pub async fn brand_search(
        &self,
        text: &str,
        brand: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.execute(
            SearchMode::BrandFiltered,
            &SearchInputs::text(text).with_brand(brand),
        )
        .await
    }

    /// Autocomplete on the beginning of titles and keywords
    pub async fn prefix_search(&self, prefix: &str) -> Result<SearchResponse, SearchError> {
        self.execute(SearchMode::PrefixAutocomplete, &SearchInputs::text(prefix))
            .await
    }

    pub async fn multilingual_search(&self, text: &str) -> Result<SearchResponse, SearchError> {
        self.execute(SearchMode::Multilingual, &SearchInputs::text(text))
            .await
    }

    /// Fuzzy search plus at most one suggested corrected query
    pub async fn spelling_correction_search(
        &self,
        text: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.execute(SearchMode::SpellingCorrection, &SearchInputs::text(text))
            .await
    }

    /// Health predicate
    pub async fn is_healthy(&self, max_attempts: u32, delay: Duration) -> bool {
        check_connection(self.backend.as_ref(), max_attempts, delay).await
    }
}
