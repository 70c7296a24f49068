pub mod documents;
pub mod health;
pub mod query;

use axum::http::{header, Method, StatusCode};
use axum::{routing::delete, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;
use crate::domain::DomainError;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/upload/text", post(documents::upload_text))
        .route("/upload/image", post(documents::upload_image))
        .route("/upload/audio", post(documents::upload_audio))
        .route("/query", post(query::query_documents))
        .route("/documents", get(documents::list_documents))
        .route("/documents/{id}", delete(documents::delete_document))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<header::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

/// Shared error-to-status mapping for handlers.
pub(crate) fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Embedding(_) | DomainError::Transcription(_) => StatusCode::BAD_GATEWAY,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
