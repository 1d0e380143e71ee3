use crate::Generator;
use neat_core::ShortId;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator producing "seq000000", "seq000001", ...
///
/// Useful for fixtures and tests where ids must be predictable. Ids are unique
/// within a single instance only.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Starts counting at `offset`, e.g. to continue after ids already stored.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortId::new(format!("{}{:06}", self.prefix, count))
    }
}
