//! Shared application state passed to every handler.

use std::sync::Arc;
use std::time::Instant;

use trainhub_core::config::AppConfig;
use trainhub_core::traits::storage::StorageProvider;
use trainhub_database::DocumentStore;
use trainhub_service::TrainingDataService;

/// Application state cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Document store.
    pub store: Arc<dyn DocumentStore>,
    /// Private file storage.
    pub storage: Arc<dyn StorageProvider>,
    /// Upload workflow.
    pub training_service: Arc<TrainingDataService>,
    /// When the server started.
    pub started_at: Instant,
}

impl AppState {
    /// Wire the upload workflow over the given store and storage.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let training_service = TrainingDataService::new(
            Arc::clone(&store),
            Arc::clone(&storage),
            config.ingest.clone(),
            config.storage.url_prefix.clone(),
        );
        Self {
            config: Arc::new(config),
            store,
            storage,
            training_service: Arc::new(training_service),
            started_at: Instant::now(),
        }
    }
}
