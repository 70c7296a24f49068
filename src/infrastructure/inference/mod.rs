mod clip;
mod speech;

pub use clip::ClipEmbedding;
pub use speech::SpeechToText;
