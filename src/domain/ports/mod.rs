mod document_store;
mod embedding;
mod transcription;

pub use document_store::DocumentStore;
pub use embedding::EmbeddingService;
pub use transcription::Transcriber;
