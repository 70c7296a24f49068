use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::InferenceConfig;

/// HTTP client for the CLIP embedding endpoints of the inference service.
///
/// Text and image embeddings come from the same model, so both land in one
/// shared vector space.
#[derive(Clone)]
pub struct ClipEmbedding {
    base_url: String,
    dimension: usize,
    http: Client,
}

impl ClipEmbedding {
    pub fn new(base_url: impl Into<String>, dimension: usize) -> Self {
        Self {
            base_url: base_url.into(),
            dimension,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(&config.base_url, config.embedding_dimension)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn check_dimension(&self, embedding: Vec<f32>) -> Result<Embedding, DomainError> {
        if embedding.len() != self.dimension {
            return Err(DomainError::embedding(format!(
                "expected embedding dimension {}, got {}",
                self.dimension,
                embedding.len()
            )));
        }
        Ok(Embedding::new(embedding))
    }
}

#[derive(Serialize)]
struct TextEmbeddingRequest<'a> {
    texts: &'a [&'a str],
}

#[derive(Serialize)]
struct ImageEmbeddingRequest {
    image: String,
}

#[derive(Deserialize)]
struct TextEmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ImageEmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingService for ClipEmbedding {
    async fn embed_text(&self, text: &str) -> Result<Embedding, DomainError> {
        let mut embeddings = self.embed_text_batch(&[text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| DomainError::embedding("no embedding returned"))
    }

    async fn embed_text_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response: TextEmbeddingResponse = self
            .http
            .post(self.endpoint("/embeddings/text"))
            .json(&TextEmbeddingRequest { texts })
            .send()
            .await
            .map_err(|e| DomainError::embedding(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::embedding(e.to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::embedding(e.to_string()))?;

        if response.embeddings.len() != texts.len() {
            return Err(DomainError::embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        response
            .embeddings
            .into_iter()
            .map(|e| self.check_dimension(e))
            .collect()
    }

    async fn embed_image(&self, image: &[u8]) -> Result<Embedding, DomainError> {
        let response: ImageEmbeddingResponse = self
            .http
            .post(self.endpoint("/embeddings/image"))
            .json(&ImageEmbeddingRequest {
                image: BASE64.encode(image),
            })
            .send()
            .await
            .map_err(|e| DomainError::embedding(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::embedding(e.to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::embedding(e.to_string()))?;

        self.check_dimension(response.embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_embed_text_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings/text"))
            .and(body_json(json!({"texts": ["hello"]})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"embeddings": [[0.1, 0.2, 0.3]]})),
            )
            .mount(&server)
            .await;

        let client = ClipEmbedding::new(server.uri(), 3);
        let embedding = client.embed_text("hello").await.unwrap();
        assert_eq!(embedding.as_slice(), &[0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_image_sends_base64_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings/image"))
            .and(body_json(json!({"image": BASE64.encode([1u8, 2, 3])})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"embedding": [1.0, 0.0]})),
            )
            .mount(&server)
            .await;

        let client = ClipEmbedding::new(server.uri(), 2);
        let embedding = client.embed_image(&[1, 2, 3]).await.unwrap();
        assert_eq!(embedding.dimension(), 2);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_embedding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings/text"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"embeddings": [[0.1, 0.2]]})),
            )
            .mount(&server)
            .await;

        let client = ClipEmbedding::new(server.uri(), 512);
        let err = client.embed_text("hello").await.unwrap_err();
        assert!(matches!(err, DomainError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_embedding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings/text"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ClipEmbedding::new(server.uri(), 3);
        let err = client.embed_text("hello").await.unwrap_err();
        assert!(matches!(err, DomainError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_the_network() {
        let client = ClipEmbedding::new("http://127.0.0.1:1", 3);
        let embeddings = client.embed_text_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }
}
