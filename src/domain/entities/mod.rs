mod document;
mod embedding;

pub use document::{Document, Modality, NewDocument, RagResponse, ScoredDocument};
pub use embedding::Embedding;
