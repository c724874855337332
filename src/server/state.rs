use crate::pipeline::SearchService;
use blastgate_core::Config;
use std::sync::Arc;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: SearchService, config: Config) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }

    pub fn from_config(config: Config) -> Self {
        let service = SearchService::from_config(&config);
        Self::new(service, config)
    }
}
