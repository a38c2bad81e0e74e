//! Sled-based history of generated digests.

use crate::digest::Digest;
use crate::quiz::Quiz;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    DbError(#[from] sled::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A stored digest with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDigest {
    /// File path or URL the text came from
    pub source: String,
    /// Summary density the digest was built with
    pub length: u32,
    /// SHA256 of the text the digest was built from
    #[serde(default)]
    pub text_hash: String,
    /// When the digest was created
    pub created_at: DateTime<Utc>,
    pub digest: Digest,
}

impl StoredDigest {
    pub fn new(source: String, length: u32, text: &str, digest: Digest) -> Self {
        Self {
            source,
            length,
            text_hash: text_hash(text),
            created_at: Utc::now(),
            digest,
        }
    }

    /// True when the digest was built from exactly `text`
    pub fn built_from(&self, text: &str) -> bool {
        self.text_hash == text_hash(text)
    }
}

/// Hex SHA256 of `text`. Records saved without a hash never match.
pub fn text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sled-based storage for digests, keyed by a hash of their source.
///
/// Storing the same source again replaces the earlier digest.
pub struct Storage {
    db: sled::Db,
}

impl Storage {
    /// Open or create storage at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Store a digest for a source
    pub fn store(&self, stored: &StoredDigest) -> Result<(), StorageError> {
        let key = Self::source_key(&stored.source);
        let value = serde_json::to_vec(stored)?;
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        debug!(source = %stored.source, "stored digest");
        Ok(())
    }

    /// Retrieve the digest for a source
    pub fn get(&self, source: &str) -> Result<Option<StoredDigest>, StorageError> {
        let key = Self::source_key(source);
        self.db
            .get(key.as_bytes())?
            .map(|data| serde_json::from_slice(&data))
            .transpose()
            .map_err(StorageError::from)
    }

    /// The stored quiz for `source`, if it was built from this same `text`.
    ///
    /// Labels such as `stdin` or an edited file's path are shared by
    /// different texts, so the label alone never selects a quiz.
    pub fn reusable_quiz(&self, source: &str, text: &str) -> Result<Option<Quiz>, StorageError> {
        Ok(self
            .get(source)?
            .filter(|stored| stored.built_from(text) && !stored.digest.quiz.is_empty())
            .map(|stored| stored.digest.quiz))
    }

    /// All stored digests, newest first
    pub fn list_all(&self) -> Result<Vec<StoredDigest>, StorageError> {
        let mut results = Vec::new();
        for item in self.db.iter() {
            let (_key, value) = item?;
            results.push(serde_json::from_slice::<StoredDigest>(&value)?);
        }
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    /// Delete the digest for a source, returning whether one existed
    pub fn delete(&self, source: &str) -> Result<bool, StorageError> {
        let key = Self::source_key(source);
        let existed = self.db.remove(key.as_bytes())?.is_some();
        self.db.flush()?;
        Ok(existed)
    }

    /// Number of stored digests
    pub fn count(&self) -> usize {
        self.db.len()
    }

    fn source_key(source: &str) -> String {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}
