use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::routes::error_status;
use crate::api::state::AppState;
use crate::domain::{Modality, RagResponse, ScoredDocument};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub relevant_documents: Vec<RankedDocumentResponse>,
}

#[derive(Debug, Serialize)]
pub struct RankedDocumentResponse {
    pub id: String,
    pub content: String,
    pub modality: Modality,
    pub similarity_score: f32,
}

impl From<ScoredDocument> for RankedDocumentResponse {
    fn from(doc: ScoredDocument) -> Self {
        Self {
            id: doc.id,
            content: doc.content,
            modality: doc.modality,
            similarity_score: doc.score,
        }
    }
}

impl From<RagResponse> for QueryResponse {
    fn from(response: RagResponse) -> Self {
        Self {
            answer: response.answer,
            relevant_documents: response
                .relevant_documents
                .into_iter()
                .map(RankedDocumentResponse::from)
                .collect(),
        }
    }
}

pub async fn query_documents(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, StatusCode> {
    let result = match request.top_k {
        Some(top_k) => {
            state
                .retrieval_service
                .query_top_k(&request.query, top_k)
                .await
        }
        None => state.retrieval_service.query(&request.query).await,
    };

    match result {
        Ok(response) => Ok(Json(QueryResponse::from(response))),
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            Err(error_status(&e))
        }
    }
}
