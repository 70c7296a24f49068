use std::sync::Arc;

use crate::application::{IngestService, RetrievalService};
use crate::domain::ports::DocumentStore;
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<IngestService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        ingest_service: Arc<IngestService>,
        retrieval_service: Arc<RetrievalService>,
        store: Arc<dyn DocumentStore>,
        config: Config,
    ) -> Self {
        Self {
            ingest_service,
            retrieval_service,
            store,
            config: Arc::new(config),
        }
    }
}
