use async_trait::async_trait;

use crate::domain::{Document, DomainError, Embedding, NewDocument, ScoredDocument};

/// Owner of all persisted state: documents paired with their embeddings.
///
/// A document and its embedding move in lockstep under insert and delete;
/// implementations must never let the two drift apart.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends a (document, embedding) pair, mints the id, and returns the
    /// stored document.
    async fn insert(
        &self,
        new: NewDocument,
        embedding: Embedding,
    ) -> Result<Document, DomainError>;

    async fn get(&self, id: &str) -> Result<Option<Document>, DomainError>;

    /// Every stored document, in insertion order.
    async fn list_all(&self) -> Result<Vec<Document>, DomainError>;

    /// Removes the document with the given id together with its embedding,
    /// preserving the relative order of the remaining entries. Fails with
    /// `NotFound` when no document has that id.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;

    /// Scores every stored embedding against `query` by cosine similarity and
    /// returns at most `k` documents, best first. Ties rank by insertion
    /// order, first-inserted first.
    async fn top_k(
        &self,
        query: &Embedding,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError>;
}
