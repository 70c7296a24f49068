use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::Transcriber, DomainError};
use crate::infrastructure::config::InferenceConfig;

/// HTTP client for the speech-to-text endpoint of the inference service.
#[derive(Clone)]
pub struct SpeechToText {
    base_url: String,
    http: Client,
}

impl SpeechToText {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(&config.base_url)
    }
}

#[derive(Serialize)]
struct TranscriptionRequest<'a> {
    samples: &'a [f32],
    sample_rate: u32,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl Transcriber for SpeechToText {
    async fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String, DomainError> {
        let url = format!("{}/transcriptions", self.base_url.trim_end_matches('/'));
        let response: TranscriptionResponse = self
            .http
            .post(url)
            .json(&TranscriptionRequest {
                samples,
                sample_rate,
            })
            .send()
            .await
            .map_err(|e| DomainError::transcription(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::transcription(e.to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::transcription(e.to_string()))?;

        Ok(response.text)
    }
}
