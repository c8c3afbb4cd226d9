//! Web server module
//!
//! Provides the JSON HTTP API for searchfront.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::SearchParams;
pub use routes::{create_router, route_path};
pub use state::AppState;
