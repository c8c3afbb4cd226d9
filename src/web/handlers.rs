//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::error::{SearchError, ValidationError};
use crate::query::{SearchInputs, SearchMode};
use crate::results::SearchResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// Query parameters accepted by every search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Language code (language search)
    pub lang: Option<String>,
    /// Brand name (brand search)
    pub brand: Option<String>,
    /// Prefix (autocomplete); `q` is accepted as well
    pub prefix: Option<String>,
}

impl SearchParams {
    pub fn into_inputs(self, mode: SearchMode) -> SearchInputs {
        let text = match mode {
            SearchMode::PrefixAutocomplete => self.prefix.or(self.q),
            _ => self.q,
        };
        SearchInputs {
            text,
            language: self.lang,
            brand: self.brand,
        }
    }
}

/// Search handler shared by all modes.
/// An undecodable query string is reported like any other invalid input.
pub async fn search(
    mode: SearchMode,
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(malformed)?;
    let inputs = params.into_inputs(mode);
    let response = state.search.execute(mode, &inputs).await?;
    Ok(Json(response))
}

fn malformed(rejection: QueryRejection) -> SearchError {
    ValidationError::MalformedQuery(rejection.body_text()).into()
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let engine = &state.settings.engine;
    let connected = state
        .search
        .is_healthy(engine.health_attempts, engine.retry_delay())
        .await;

    if connected {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "message": "Search engine is connected",
                "instance": state.instance_name(),
                "version": crate::VERSION
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "message": "Search engine is not connected",
                "instance": state.instance_name(),
                "version": crate::VERSION
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_param_preferred_for_autocomplete() {
        let params = SearchParams {
            q: Some("query".to_string()),
            prefix: Some("org".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.into_inputs(SearchMode::PrefixAutocomplete).text.as_deref(),
            Some("org")
        );
    }

    #[test]
    fn test_q_falls_back_for_autocomplete() {
        let params = SearchParams {
            q: Some("org".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.into_inputs(SearchMode::PrefixAutocomplete).text.as_deref(),
            Some("org")
        );
    }

    #[test]
    fn test_prefix_ignored_elsewhere() {
        let params = SearchParams {
            prefix: Some("org".to_string()),
            lang: Some("en".to_string()),
            ..Default::default()
        };
        let inputs = params.into_inputs(SearchMode::LanguageFiltered);
        assert_eq!(inputs.text, None);
        assert_eq!(inputs.language.as_deref(), Some("en"));
    }
}
