use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use neat_core::{Feed, FeedError};
use tokio::sync::Notify;
use typed_builder::TypedBuilder;

use crate::admin::AdminKey;
use crate::error::AppError;
use crate::render::{ShortsPage, ShortsRenderer};

/// Shared state handed to every handler.
#[derive(Clone, TypedBuilder)]
pub struct AppState {
    pub feed: Arc<dyn Feed>,
    pub admin_key: Arc<AdminKey>,
    #[builder(default = Arc::new(ShortsPage) as Arc<dyn ShortsRenderer>)]
    pub renderer: Arc<dyn ShortsRenderer>,
    #[builder(default = PathBuf::from("./static"), setter(into))]
    pub static_dir: PathBuf,
    #[builder(default)]
    pub shutdown: Arc<Shutdown>,
}

impl AppState {
    pub fn authorize(&self, password: &str) -> Result<(), AppError> {
        if self.admin_key.verify(password) {
            return Ok(());
        }
        tracing::warn!("rejected request with invalid admin password");
        Err(AppError::Forbidden)
    }

    /// Converts a feed error, stopping the server if it is fatal.
    pub fn escalate(&self, err: FeedError) -> AppError {
        if err.is_fatal() {
            tracing::error!(error = %err, "store is unusable, shutting down");
            self.shutdown.trip();
        }
        err.into()
    }

    pub fn static_file(&self, name: &str) -> PathBuf {
        self.static_dir.join(name)
    }
}

/// One-shot signal from request handlers to the server loop.
#[derive(Debug, Default)]
pub struct Shutdown {
    notify: Notify,
    fatal: AtomicBool,
}

impl Shutdown {
    pub fn trip(&self) {
        self.fatal.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_tripped(&self) -> bool {
        self.fatal.load(Ordering::SeqCst)
    }

    /// Completes once [`trip`](Self::trip) has been called.
    pub async fn tripped(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_tripped() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trip_wakes_waiters() {
        let shutdown = Arc::new(Shutdown::default());
        let waiter = tokio::spawn({
            let shutdown = Arc::clone(&shutdown);
            async move { shutdown.tripped().await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.trip();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(shutdown.is_tripped());
    }

    #[tokio::test]
    async fn tripped_returns_immediately_after_trip() {
        let shutdown = Shutdown::default();
        shutdown.trip();
        tokio::time::timeout(Duration::from_secs(1), shutdown.tripped())
            .await
            .unwrap();
    }
}
