use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::domain::ports::DocumentStore;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub documents_count: usize,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Multimodal RAG API is running!".into(),
    })
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let documents_count = state
        .store
        .count()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        documents_count,
    }))
}
