//! Application layer - use cases orchestrating domain ports.
//!
//! Services depend on the domain traits rather than concrete adapters, so the
//! store and the inference backends can be swapped out in tests.

pub mod services;

pub use services::{IngestService, RetrievalService};
