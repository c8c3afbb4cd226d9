//! Search orchestration module
//!
//! Composes query construction, the engine call and result normalization
//! behind one operation per search mode.

mod executor;

pub use executor::SearchFacade;
