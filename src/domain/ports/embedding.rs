use async_trait::async_trait;

use crate::domain::{DomainError, Embedding};

/// Embedding generator mapping text and images into one shared vector space.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed_text(&self, text: &str) -> Result<Embedding, DomainError>;
    async fn embed_text_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;
    /// `image` is an encoded image as uploaded; the collaborator decodes it
    /// and fails on undecodable input.
    async fn embed_image(&self, image: &[u8]) -> Result<Embedding, DomainError>;
    fn dimension(&self) -> usize;
}
