use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    ports::DocumentStore, Document, DomainError, Embedding, NewDocument, ScoredDocument,
};

struct Entry {
    document: Document,
    embedding: Embedding,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    // Per-modality id counters; monotonic, never reused after a delete.
    counters: HashMap<&'static str, u64>,
}

/// In-memory document store: one ordered collection of (document, embedding)
/// records behind a single lock, so the pair can never drift out of sync.
pub struct InMemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        new: NewDocument,
        embedding: Embedding,
    ) -> Result<Document, DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let counter = inner.counters.entry(new.modality.as_str()).or_insert(0);
        let id = format!("{}_{}", new.modality, *counter);
        *counter += 1;

        let document = Document {
            id,
            content: new.content,
            modality: new.modality,
            filename: new.filename,
            transcription: new.transcription,
            created_at: Utc::now(),
        };

        inner.entries.push(Entry {
            document: document.clone(),
            embedding,
        });
        Ok(document)
    }

    async fn get(&self, id: &str) -> Result<Option<Document>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner
            .entries
            .iter()
            .find(|entry| entry.document.id == id)
            .map(|entry| entry.document.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Document>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner
            .entries
            .iter()
            .map(|entry| entry.document.clone())
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        match inner.entries.iter().position(|e| e.document.id == id) {
            Some(idx) => {
                inner.entries.remove(idx);
                Ok(())
            }
            None => Err(DomainError::not_found(format!("document {id}"))),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner.entries.len())
    }

    async fn top_k(
        &self,
        query: &Embedding,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        // The read lock is held for the full scan and sort so a concurrent
        // insert or delete can never be observed mid-ranking.
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut scored: Vec<ScoredDocument> = inner
            .entries
            .iter()
            .map(|entry| ScoredDocument {
                id: entry.document.id.clone(),
                content: entry.document.content.clone(),
                modality: entry.document.modality,
                score: query.cosine_similarity(&entry.embedding),
            })
            .collect();

        // Stable sort: equal scores keep insertion order, first-inserted first.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Modality;

    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
    }

    #[tokio::test]
    async fn test_insert_assigns_modality_ids() {
        let store = store();
        let a = store
            .insert(NewDocument::text("first", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        let b = store
            .insert(NewDocument::text("second", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        let c = store
            .insert(NewDocument::image("cat.png"), Embedding::new(vec![1.0]))
            .await
            .unwrap();

        assert_eq!(a.id, "text_0");
        assert_eq!(b.id, "text_1");
        assert_eq!(c.id, "image_0");
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = store();
        let a = store
            .insert(NewDocument::text("a", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        store.delete(&a.id).await.unwrap();

        let b = store
            .insert(NewDocument::text("b", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        assert_eq!(b.id, "text_1");
    }

    #[tokio::test]
    async fn test_list_all_is_insertion_ordered_and_idempotent() {
        let store = store();
        for content in ["one", "two", "three"] {
            store
                .insert(NewDocument::text(content, None), Embedding::new(vec![1.0]))
                .await
                .unwrap();
        }

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();
        let contents: Vec<_> = first.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_entry() {
        let store = store();
        store
            .insert(NewDocument::text("keep-a", None), Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        let victim = store
            .insert(NewDocument::text("drop", None), Embedding::new(vec![0.0, 1.0]))
            .await
            .unwrap();
        store
            .insert(NewDocument::text("keep-b", None), Embedding::new(vec![1.0, 1.0]))
            .await
            .unwrap();

        store.delete(&victim.id).await.unwrap();

        let left = store.list_all().await.unwrap();
        let contents: Vec<_> = left.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, ["keep-a", "keep-b"]);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = store();
        store
            .insert(NewDocument::text("only", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();

        let err = store.delete("text_99").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_then_delete_leaves_empty_store() {
        let store = store();
        let doc = store
            .insert(NewDocument::text("transient", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        store.delete(&doc.id).await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_top_k_ranks_by_similarity() {
        let store = store();
        store
            .insert(NewDocument::text("orthogonal", None), Embedding::new(vec![0.0, 1.0]))
            .await
            .unwrap();
        store
            .insert(NewDocument::text("aligned", None), Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .insert(NewDocument::text("diagonal", None), Embedding::new(vec![1.0, 1.0]))
            .await
            .unwrap();

        let query = Embedding::new(vec![1.0, 0.0]);
        let ranked = store.top_k(&query, 3).await.unwrap();
        let contents: Vec<_> = ranked.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, ["aligned", "diagonal", "orthogonal"]);
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_top_k_ties_rank_first_inserted_first() {
        let store = store();
        let first = store
            .insert(NewDocument::text("first", None), Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        let second = store
            .insert(NewDocument::text("second", None), Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();

        let ranked = store.top_k(&Embedding::new(vec![1.0, 0.0]), 2).await.unwrap();
        assert_eq!(ranked[0].id, first.id);
        assert_eq!(ranked[1].id, second.id);
    }

    #[tokio::test]
    async fn test_top_k_larger_than_store_returns_everything() {
        let store = store();
        store
            .insert(NewDocument::text("a", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();
        store
            .insert(NewDocument::text("b", None), Embedding::new(vec![1.0]))
            .await
            .unwrap();

        let ranked = store.top_k(&Embedding::new(vec![1.0]), 10).await.unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[tokio::test]
    async fn test_top_k_is_deterministic() {
        let store = store();
        store
            .insert(NewDocument::text("a", None), Embedding::new(vec![0.3, 0.7]))
            .await
            .unwrap();
        store
            .insert(NewDocument::audio("b", None), Embedding::new(vec![0.7, 0.3]))
            .await
            .unwrap();

        let query = Embedding::new(vec![0.5, 0.5]);
        let once = store.top_k(&query, 2).await.unwrap();
        let twice = store.top_k(&query, 2).await.unwrap();
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.score, b.score);
        }
    }

    #[tokio::test]
    async fn test_get_finds_document_by_id() {
        let store = store();
        let doc = store
            .insert(
                NewDocument::audio("spoken words", Some("talk.wav".into())),
                Embedding::new(vec![1.0]),
            )
            .await
            .unwrap();

        let found = store.get(&doc.id).await.unwrap().unwrap();
        assert_eq!(found.modality, Modality::Audio);
        assert_eq!(found.transcription.as_deref(), Some("spoken words"));
        assert!(store.get("text_0").await.unwrap().is_none());
    }
}
