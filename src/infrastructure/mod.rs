pub mod config;
pub mod inference;
pub mod store;

pub use config::Config;
pub use inference::{ClipEmbedding, SpeechToText};
pub use store::InMemoryDocumentStore;
