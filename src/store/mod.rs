//! Credential store
//!
//! Durable persistence of user records as a single JSON document.
//! The store deliberately trades write efficiency for simplicity: every
//! save rewrites the full collection, and every load reads it back.
//! Uniqueness of emails is enforced by the caller, not here.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// A stored identity: name fields, unique email, and password hash.
///
/// On the wire the hash is stored under the `password` key; the plaintext
/// password is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

/// Store failures, kept separate from API errors so callers can decide
/// what (if anything) to surface to clients.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read credential store")]
    Read(#[source] std::io::Error),

    #[error("credential store is malformed")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode credential store")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write credential store")]
    Write(#[source] std::io::Error),
}

/// File-backed credential store.
///
/// `save_all` writes a temp file and renames it into place, so a
/// concurrent `load_all` observes either the previous or the new
/// collection, never a torn write.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the full collection. A missing backing file is the first-run
    /// case and yields an empty collection; an unreadable or unparsable
    /// file is an error.
    pub async fn load_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Malformed),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    /// Replace the backing collection with `records`.
    pub async fn save_all(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(StoreError::Write)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await.map_err(StoreError::Write)?;
        fs::rename(&tmp, &self.path).await.map_err(StoreError::Write)?;
        Ok(())
    }

    /// Probe the store for the readiness check.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.load_all().await.map(|_| ())
    }
}
