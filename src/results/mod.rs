//! Result normalization
//!
//! Turns the engine's raw hits and suggestions into a mode-independent
//! [`SearchResponse`].

mod normalizer;
mod types;

pub use normalizer::normalize;
pub use types::*;
