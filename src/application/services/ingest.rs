use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    ports::{DocumentStore, EmbeddingService, Transcriber},
    Document, DomainError, NewDocument,
};

/// Upload pipeline: one embed-then-insert path per modality.
///
/// Embedding (and transcription) always happen before the store is touched,
/// so a collaborator failure leaves no partial document behind.
pub struct IngestService {
    embedding: Arc<dyn EmbeddingService>,
    transcriber: Arc<dyn Transcriber>,
    store: Arc<dyn DocumentStore>,
}

impl IngestService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        transcriber: Arc<dyn Transcriber>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            embedding,
            transcriber,
            store,
        }
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn ingest_text(
        &self,
        text: &str,
        filename: Option<String>,
    ) -> Result<Document, DomainError> {
        let embedding = self.embedding.embed_text(text).await?;
        self.store
            .insert(NewDocument::text(text, filename), embedding)
            .await
    }

    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn ingest_image(
        &self,
        image: &[u8],
        filename: &str,
    ) -> Result<Document, DomainError> {
        let embedding = self.embedding.embed_image(image).await?;
        self.store
            .insert(NewDocument::image(filename), embedding)
            .await
    }

    /// Transcribes the waveform, embeds the transcription, and stores the
    /// resulting audio document.
    #[instrument(skip(self, samples), fields(samples = samples.len(), sample_rate))]
    pub async fn ingest_audio(
        &self,
        samples: &[f32],
        sample_rate: u32,
        filename: Option<String>,
    ) -> Result<Document, DomainError> {
        let transcription = self.transcriber.transcribe(samples, sample_rate).await?;
        let embedding = self.embedding.embed_text(&transcription).await?;
        self.store
            .insert(NewDocument::audio(transcription, filename), embedding)
            .await
    }
}
