use std::sync::Arc;

use mindwell_checkin::catalog::Catalog;
use mindwell_storage::store::DocumentStore;

use crate::config::ApiConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub catalog: &'static Catalog,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: ApiConfig) -> Self {
        Self {
            store,
            catalog: Catalog::builtin(),
            config: Arc::new(config),
        }
    }

    pub fn max_conflict_retries(&self) -> u32 {
        self.config.store.max_conflict_retries
    }
}
