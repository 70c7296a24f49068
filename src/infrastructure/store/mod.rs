mod memory;

pub use memory::InMemoryDocumentStore;
