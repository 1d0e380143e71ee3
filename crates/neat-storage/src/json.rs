use async_trait::async_trait;
use neat_core::store::{ContentStore, Result};
use neat_core::{ContentStorage, StoreError};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};

/// Stores the whole [`ContentStorage`] as a single JSON file.
///
/// Saves go to a hidden sibling file first and are then renamed over the
/// target, so a reader never sees a partially written document. There is no
/// file locking: only one process may own the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_else(|| "content".as_ref()));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    async fn load(&self) -> Result<ContentStorage> {
        trace!(path = %self.path.display(), "Loading content document");

        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Content document absent, starting empty");
                return Ok(ContentStorage::default());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Content document unreadable");
                return Err(io_error(&self.path, e));
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %self.path.display(), "Content document empty");
            return Ok(ContentStorage::default());
        }

        serde_json::from_slice(&data).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Content document failed to parse");
            StoreError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, storage: &ContentStorage) -> Result<()> {
        let data = serde_json::to_vec(storage)
            .map_err(|e| StoreError::Io(format!("serialize content: {e}")))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &data)
            .await
            .map_err(|e| io_error(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            links = storage.links.len(),
            shorts = storage.shorts.len(),
            "Saved content document"
        );
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {err}", path.display()))
}
