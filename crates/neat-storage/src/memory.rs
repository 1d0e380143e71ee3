use async_trait::async_trait;
use neat_core::store::{ContentStore, Result};
use neat_core::ContentStorage;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory implementation of [`ContentStore`].
///
/// Clones share the same document, so a test can keep a handle and inspect
/// what the service under test saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<ContentStorage>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `storage`.
    pub fn with_storage(storage: ContentStorage) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Returns a copy of the current document.
    pub fn snapshot(&self) -> ContentStorage {
        self.storage.lock().clone()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn load(&self) -> Result<ContentStorage> {
        Ok(self.snapshot())
    }

    async fn save(&self, storage: &ContentStorage) -> Result<()> {
        *self.storage.lock() = storage.clone();
        Ok(())
    }
}
