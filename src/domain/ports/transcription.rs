use async_trait::async_trait;

use crate::domain::DomainError;

/// Speech-to-text collaborator. Callers pass decoded waveform samples;
/// audio container demuxing happens upstream.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes raw waveform samples. The expected sample rate is 16000 Hz.
    async fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<String, DomainError>;
}
