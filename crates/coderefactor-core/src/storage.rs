//! Artifact persistence.
//!
//! A translated artifact is written as a small UTF-8 text blob under a key
//! of the form `{user}/{YYYY-MM-DD}/{user}_{timestamp}_{lang}_{hex}.txt`.
//! The random suffix keeps keys unique across concurrent requests.
//! Artifacts are never updated or deleted by this crate.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, ErrorKind, Result, TRACING_TARGET_STORAGE};

/// A blob store able to persist artifacts.
#[async_trait::async_trait]
pub trait StorageProvider: Send + Sync {
    /// Writes `data` under `key`, replacing nothing but that key.
    async fn write(&self, key: &str, data: Vec<u8>) -> Result<()>;
}

/// A translation result ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    user_id: String,
    target_lang: String,
    code: String,
    timestamp: Timestamp,
    suffix: String,
}

impl Artifact {
    /// Creates an artifact stamped with the current time and a random suffix.
    pub fn new(
        user_id: impl Into<String>,
        target_lang: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::with_parts(
            user_id,
            target_lang,
            code,
            Timestamp::now(),
            Uuid::new_v4().simple().to_string(),
        )
    }

    /// Creates an artifact from explicit timestamp and suffix.
    pub fn with_parts(
        user_id: impl Into<String>,
        target_lang: impl Into<String>,
        code: impl Into<String>,
        timestamp: Timestamp,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            target_lang: target_lang.into(),
            code: code.into(),
            timestamp,
            suffix: suffix.into(),
        }
    }

    /// Returns the ISO-8601 UTC timestamp with microsecond precision.
    pub fn timestamp(&self) -> String {
        format!("{:.6}", self.timestamp)
    }

    /// Returns the UTC calendar date as `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        self.timestamp.to_zoned(TimeZone::UTC).date().to_string()
    }

    /// Returns the storage key.
    pub fn key(&self) -> String {
        format!(
            "{user}/{date}/{user}_{timestamp}_{lang}_{suffix}.txt",
            user = self.user_id,
            date = self.date(),
            timestamp = self.timestamp(),
            lang = self.target_lang,
            suffix = self.suffix,
        )
    }

    /// Returns the blob body: a labeled header followed by the code.
    pub fn body(&self) -> String {
        format!(
            "UserID: {}\nTimestamp: {}\nTargetLang: {}\nCode:\n{}",
            self.user_id,
            self.timestamp(),
            self.target_lang,
            self.code,
        )
    }
}

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    /// Storage key the blob was written under.
    pub key: String,
    /// Requesting user.
    pub user_id: String,
    /// ISO-8601 UTC timestamp embedded in key and header.
    pub timestamp: String,
    /// Target language of the translation.
    pub target_lang: String,
    /// Translated code.
    pub code: String,
}

/// Writes artifacts to a [`StorageProvider`].
#[derive(Clone)]
pub struct ArtifactStore {
    inner: Arc<dyn StorageProvider>,
}

impl ArtifactStore {
    /// Creates a new artifact store.
    pub fn new<P>(provider: P) -> Self
    where
        P: StorageProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a store from an already shared provider.
    pub fn from_arc(provider: Arc<dyn StorageProvider>) -> Self {
        Self { inner: provider }
    }

    /// Stamps and stores a translation, returning the persisted artifact.
    pub async fn store(
        &self,
        user_id: &str,
        target_lang: &str,
        code: &str,
    ) -> Result<StoredArtifact> {
        self.put(Artifact::new(user_id, target_lang, code)).await
    }

    /// Stores a prepared artifact.
    pub async fn put(&self, artifact: Artifact) -> Result<StoredArtifact> {
        let key = artifact.key();
        let body = artifact.body();

        tracing::debug!(
            target: TRACING_TARGET_STORAGE,
            key = %key,
            size = body.len(),
            "Writing artifact"
        );

        self.inner
            .write(&key, body.into_bytes())
            .await
            .map_err(|error| match error.kind() {
                ErrorKind::StorageWrite => error,
                _ => Error::storage_write()
                    .with_message(format!("failed to write artifact {key}"))
                    .with_source(error),
            })?;

        tracing::info!(
            target: TRACING_TARGET_STORAGE,
            key = %key,
            "Artifact stored"
        );

        Ok(StoredArtifact {
            timestamp: artifact.timestamp(),
            key,
            user_id: artifact.user_id,
            target_lang: artifact.target_lang,
            code: artifact.code,
        })
    }
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore").finish_non_exhaustive()
    }
}
