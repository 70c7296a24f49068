use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::routes::error_status;
use crate::api::state::AppState;
use crate::domain::{ports::DocumentStore, Document, Modality};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub doc_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub content: String,
    pub modality: Modality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            content: doc.content,
            modality: doc.modality,
            filename: doc.filename,
            transcription: doc.transcription,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentResponse>,
}

/// Container demuxing is out of scope here, so audio arrives as decoded
/// waveform samples rather than an encoded file.
#[derive(Debug, Deserialize)]
pub struct UploadAudioRequest {
    pub samples: Vec<f32>,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    pub filename: Option<String>,
}

fn default_sample_rate() -> u32 {
    16000
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

async fn first_file_field(
    multipart: &mut Multipart,
) -> Result<(Option<String>, Vec<u8>), StatusCode> {
    let field = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .ok_or(StatusCode::BAD_REQUEST)?;

    let filename = field.file_name().map(str::to_owned);
    let bytes = field
        .bytes()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .to_vec();
    Ok((filename, bytes))
}

pub async fn upload_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, StatusCode> {
    let (filename, bytes) = first_file_field(&mut multipart).await?;
    let text = String::from_utf8(bytes).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.ingest_service.ingest_text(&text, filename).await {
        Ok(doc) => Ok(Json(UploadResponse {
            message: "Text document uploaded successfully".into(),
            doc_id: doc.id,
            transcription: None,
        })),
        Err(e) => {
            tracing::error!(error = %e, "Failed to upload text document");
            Err(error_status(&e))
        }
    }
}

pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, StatusCode> {
    let (filename, bytes) = first_file_field(&mut multipart).await?;
    let filename = filename.unwrap_or_else(|| "unnamed".to_string());

    match state.ingest_service.ingest_image(&bytes, &filename).await {
        Ok(doc) => Ok(Json(UploadResponse {
            message: "Image document uploaded successfully".into(),
            doc_id: doc.id,
            transcription: None,
        })),
        Err(e) => {
            tracing::error!(error = %e, "Failed to upload image document");
            Err(error_status(&e))
        }
    }
}

pub async fn upload_audio(
    State(state): State<AppState>,
    Json(request): Json<UploadAudioRequest>,
) -> Result<Json<UploadResponse>, StatusCode> {
    match state
        .ingest_service
        .ingest_audio(&request.samples, request.sample_rate, request.filename)
        .await
    {
        Ok(doc) => Ok(Json(UploadResponse {
            message: "Audio document uploaded successfully".into(),
            doc_id: doc.id,
            transcription: doc.transcription,
        })),
        Err(e) => {
            tracing::error!(error = %e, "Failed to upload audio document");
            Err(error_status(&e))
        }
    }
}

pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<ListDocumentsResponse>, StatusCode> {
    match state.store.list_all().await {
        Ok(documents) => Ok(Json(ListDocumentsResponse {
            documents: documents.into_iter().map(DocumentResponse::from).collect(),
        })),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list documents");
            Err(error_status(&e))
        }
    }
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, StatusCode> {
    match state.store.delete(&id).await {
        Ok(()) => Ok(Json(DeleteResponse {
            message: format!("Document {id} deleted successfully"),
        })),
        Err(e) => {
            tracing::error!(error = %e, doc_id = %id, "Failed to delete document");
            Err(error_status(&e))
        }
    }
}
