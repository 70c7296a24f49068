mod ingest;
mod retrieval;

pub use ingest::IngestService;
pub use retrieval::RetrievalService;
