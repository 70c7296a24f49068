use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document. The id is assigned by the store at insertion time
/// as `"<modality>_<n>"` where `n` is a per-modality counter that is never
/// reused, so ids stay unique across delete/re-insert sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub modality: Modality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertion draft for a document; the store mints the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub content: String,
    pub modality: Modality,
    pub filename: Option<String>,
    pub transcription: Option<String>,
}

impl NewDocument {
    pub fn text(content: impl Into<String>, filename: Option<String>) -> Self {
        Self {
            content: content.into(),
            modality: Modality::Text,
            filename,
            transcription: None,
        }
    }

    /// Images carry a filename-derived label as their textual content.
    pub fn image(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            content: format!("Image: {filename}"),
            modality: Modality::Image,
            filename: Some(filename),
            transcription: None,
        }
    }

    /// Audio documents carry the transcription both as searchable content
    /// and as a dedicated field.
    pub fn audio(transcription: impl Into<String>, filename: Option<String>) -> Self {
        let transcription = transcription.into();
        Self {
            content: format!("Audio transcription: {transcription}"),
            modality: Modality::Audio,
            filename,
            transcription: Some(transcription),
        }
    }
}

/// A document paired with its similarity score for one query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub id: String,
    pub content: String,
    pub modality: Modality,
    pub score: f32,
}

/// Outcome of a retrieval query: the ranked documents plus an answer string
/// assembled deterministically from the top hit.
#[derive(Debug, Clone, Serialize)]
pub struct RagResponse {
    pub answer: String,
    pub relevant_documents: Vec<ScoredDocument>,
}
