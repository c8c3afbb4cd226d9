//! Route definitions

use super::handlers::{self, SearchParams};
use super::state::AppState;
use crate::query::SearchMode;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Path serving each search mode
pub fn route_path(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Basic => "/api/search",
        SearchMode::Fuzzy => "/api/fuzzy-search",
        SearchMode::LanguageFiltered => "/api/language-search",
        SearchMode::BrandFiltered => "/api/brand-search",
        SearchMode::PrefixAutocomplete => "/api/autocomplete",
        SearchMode::Multilingual => "/api/multilingual-search",
        SearchMode::SpellingCorrection => "/api/spell-search",
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().route("/health", get(handlers::health));

    for mode in SearchMode::ALL {
        router = router.route(
            route_path(mode),
            get(
                move |state: State<AppState>,
                      params: Result<Query<SearchParams>, QueryRejection>| {
                    handlers::search(mode, state, params)
                },
            ),
        );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
