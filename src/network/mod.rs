//! HTTP networking module
//!
//! Provides the HTTP client used to reach the search engine.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{EngineRequest, EngineResponse, HttpMethod, RequestBody};
