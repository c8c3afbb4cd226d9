//! Query construction
//!
//! Maps a [`SearchMode`] and its inputs to the structured [`QueryRequest`]
//! understood by the search engine.

mod builder;
mod mode;
mod request;

pub use builder::{build, SUGGESTION_FIELD, SUGGESTION_NAME};
pub use mode::*;
pub use request::*;
