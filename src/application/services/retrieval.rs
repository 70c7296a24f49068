use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    ports::{DocumentStore, EmbeddingService},
    DomainError, RagResponse,
};

const NO_DOCUMENTS_ANSWER: &str =
    "No documents available. Please upload some documents first.";
const NO_RELEVANT_ANSWER: &str = "No relevant documents found for your query.";
const ANSWER_SNIPPET_CHARS: usize = 200;

/// Stateless retrieval over the document store: embeds the query, ranks every
/// stored document by cosine similarity, and assembles a templated answer
/// from the top hit.
pub struct RetrievalService {
    embedding: Arc<dyn EmbeddingService>,
    store: Arc<dyn DocumentStore>,
    default_top_k: usize,
}

impl RetrievalService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        store: Arc<dyn DocumentStore>,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedding,
            store,
            default_top_k,
        }
    }

    #[instrument(skip(self))]
    pub async fn query(&self, text: &str) -> Result<RagResponse, DomainError> {
        self.query_top_k(text, self.default_top_k).await
    }

    #[instrument(skip(self))]
    pub async fn query_top_k(&self, text: &str, k: usize) -> Result<RagResponse, DomainError> {
        // Empty store short-circuits before any embedding call.
        if self.store.count().await? == 0 {
            return Ok(RagResponse {
                answer: NO_DOCUMENTS_ANSWER.to_string(),
                relevant_documents: Vec::new(),
            });
        }

        let query_embedding = self.embedding.embed_text(text).await?;
        let results = self.store.top_k(&query_embedding, k).await?;

        let answer = match results.first() {
            Some(top) => format!(
                "Based on the most relevant document ({}), here's what I found: {}...",
                top.modality,
                truncate_chars(&top.content, ANSWER_SNIPPET_CHARS)
            ),
            None => NO_RELEVANT_ANSWER.to_string(),
        };

        Ok(RagResponse {
            answer,
            relevant_documents: results,
        })
    }
}

/// First `limit` characters of `s`, never splitting a UTF-8 code point.
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
