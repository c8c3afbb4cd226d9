//! Application state shared across handlers

use crate::config::Settings;
use crate::engine::SearchBackend;
use crate::search::SearchFacade;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search facade over the configured backend
    pub search: Arc<SearchFacade>,
}

impl AppState {
    /// Create new application state around an already-connected backend
    pub fn new(settings: Settings, backend: Arc<dyn SearchBackend>) -> Self {
        let search = Arc::new(SearchFacade::new(backend, settings.engine.index.clone()));
        Self {
            settings: Arc::new(settings),
            search,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
