//! Multimodal retrieval service.
//!
//! Documents of three modalities (text, image, transcribed audio) are embedded
//! into a shared vector space and ranked against natural-language queries by
//! cosine similarity. Embedding generation and speech-to-text run in an
//! external inference service consumed through domain ports.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
