use thiserror::Error;

/// Errors raised while validating user input, before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("release hours must be a non-negative integer, got '{0}'")]
    InvalidReleaseHours(String),
    #[error("release time out of range: {0}")]
    ReleaseOutOfRange(String),
}

/// Errors from a [`ContentStore`](crate::store::ContentStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The document exists but cannot be parsed. Nothing may be served or
    /// saved on top of it.
    #[error("stored content is corrupt: {0}")]
    Corrupt(String),
    #[error("storage io failed: {0}")]
    Io(String),
}

/// Errors returned by a [`Feed`](crate::feed::Feed).
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FeedError {
    /// Whether the process should stop serving after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::Store(StoreError::Corrupt(_)))
    }
}
