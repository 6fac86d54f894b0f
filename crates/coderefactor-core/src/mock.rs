//! Mock providers for testing.
//!
//! [`MockInference`] answers prompts with canned replies selected by model
//! identifier prefix and counts every call. [`MockStorage`] keeps written
//! blobs in memory.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! coderefactor-core = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::inference::{InferenceProvider, InferenceService};
use crate::storage::{ArtifactStore, StorageProvider};
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

/// Scripted inference provider.
///
/// Model identifiers with no scripted reply are rejected as unsupported,
/// mirroring a real client that knows no such model family.
#[derive(Debug, Clone, Default)]
pub struct MockInference {
    replies: Arc<Vec<(String, Reply)>>,
    calls: Arc<AtomicUsize>,
    invoked: Arc<Mutex<Vec<String>>>,
}

impl MockInference {
    /// Creates a provider with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers models whose identifier starts with `prefix` with `text`.
    pub fn with_reply(self, prefix: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(prefix.into(), Reply::Text(text.into()))
    }

    /// Fails calls to models whose identifier starts with `prefix`.
    pub fn with_failure(self, prefix: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(prefix.into(), Reply::Failure(message.into()))
    }

    fn push(self, prefix: String, reply: Reply) -> Self {
        let mut replies = Arc::unwrap_or_clone(self.replies);
        replies.push((prefix, reply));
        Self {
            replies: Arc::new(replies),
            ..self
        }
    }

    /// Returns the number of calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the model identifiers invoked, in call order.
    pub fn invoked_models(&self) -> Vec<String> {
        self.invoked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wraps this provider into an [`InferenceService`].
    pub fn into_service(self) -> InferenceService {
        InferenceService::new(self)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for MockInference {
    async fn invoke(&self, model_id: &str, _prompt: &str) -> Result<String> {
        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| model_id.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| {
                Error::unsupported_model().with_message(format!("unsupported model: {model_id}"))
            })?;

        self.calls.fetch_add(1, Ordering::SeqCst);
        self.invoked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(model_id.to_owned());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Failure(message) => Err(Error::network().with_message(message)),
        }
    }
}

/// In-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    objects: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    failing: bool,
}

impl MockStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects every write.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Returns the blob stored under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns all stored keys in order.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns the number of stored blobs.
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wraps this provider into an [`ArtifactStore`].
    pub fn into_store(self) -> ArtifactStore {
        ArtifactStore::new(self)
    }
}

#[async_trait::async_trait]
impl StorageProvider for MockStorage {
    async fn write(&self, key: &str, data: Vec<u8>) -> Result<()> {
        if self.failing {
            return Err(Error::storage_write().with_message(format!("mock write rejected: {key}")));
        }

        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), data);

        Ok(())
    }
}
