use crate::content::ContentStorage;
use crate::error::StoreError;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence for the whole [`ContentStorage`] document.
///
/// The store is the single source of truth. Implementations do no locking of
/// their own; callers serialize load-modify-save sequences.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Loads the full document.
    ///
    /// An absent or empty backing document yields an empty
    /// [`ContentStorage`]. A document that exists but cannot be read yields
    /// [`StoreError::Io`], and one that does not parse yields
    /// [`StoreError::Corrupt`]. Neither may be treated as empty by a writer.
    async fn load(&self) -> Result<ContentStorage>;

    /// Replaces the stored document with `storage`.
    async fn save(&self, storage: &ContentStorage) -> Result<()>;
}
