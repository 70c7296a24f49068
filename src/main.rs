use std::net::SocketAddr;
use std::sync::Arc;

use multimodal_rag::api::{create_router, AppState};
use multimodal_rag::application::{IngestService, RetrievalService};
use multimodal_rag::domain::ports::DocumentStore;
use multimodal_rag::infrastructure::{ClipEmbedding, Config, InMemoryDocumentStore, SpeechToText};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "multimodal_rag=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!(
        inference_url = %config.inference.base_url,
        dimension = config.inference.embedding_dimension,
        "Configuration loaded"
    );

    let embedding = Arc::new(ClipEmbedding::from_config(&config.inference));
    let transcriber = Arc::new(SpeechToText::from_config(&config.inference));
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());

    let ingest_service = Arc::new(IngestService::new(
        embedding.clone(),
        transcriber,
        store.clone(),
    ));
    let retrieval_service = Arc::new(RetrievalService::new(
        embedding,
        store.clone(),
        config.retrieval.default_top_k,
    ));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(ingest_service, retrieval_service, store, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
