//! Storage backends for the Neat content document.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::InMemoryStore;
pub use neat_core::store::{ContentStore, Result};
pub use neat_core::StoreError;
