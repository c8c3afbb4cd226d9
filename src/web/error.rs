//! HTTP mapping of search errors

use crate::error::SearchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// A failed search as returned to HTTP callers
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::Engine(e) => {
                tracing::error!("Search engine error: {}", e);
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({
            "status": "error",
            "kind": self.0.kind(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
