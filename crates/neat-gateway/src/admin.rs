//! Admin password loaded from disk and checked on every write or export.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminKeyError {
    #[error("couldn't read admin key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("admin key file {0} has an empty first line")]
    Empty(PathBuf),
}

/// The shared admin secret.
#[derive(Clone)]
pub struct AdminKey(String);

impl AdminKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the first line of `path` as the key.
    ///
    /// A missing file or an empty first line is an error: the service has no
    /// way to accept writes without a key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AdminKeyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AdminKeyError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let first = contents.lines().next().unwrap_or_default();
        let key = first.trim_end_matches('\r');
        if key.is_empty() {
            return Err(AdminKeyError::Empty(path.to_path_buf()));
        }
        Ok(Self::new(key))
    }

    /// Constant-time comparison. An empty candidate never matches.
    pub fn verify(&self, candidate: &str) -> bool {
        if self.0.is_empty() || candidate.is_empty() {
            return false;
        }
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminKey(<redacted>)")
    }
}
