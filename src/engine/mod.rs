//! Search engine module
//!
//! Defines the [`SearchBackend`] boundary, the Elasticsearch-compatible REST
//! client implementing it, and the connection checks run against it.

mod elastic;
mod health;
mod traits;

pub use elastic::ElasticClient;
pub use health::check_connection;
pub use traits::*;
