//! Inference service abstractions.
//!
//! [`InferenceProvider`] is the seam between the request handlers and a
//! hosted model runtime. [`InferenceService`] wraps a provider for cheap
//! cloning into application state and adds structured logging around every
//! call. Calls are never retried.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{Result, TRACING_TARGET_INFERENCE};

/// A backend able to turn a prompt into generated text.
#[async_trait::async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Sends `prompt` to the model identified by `model_id` and returns the
    /// generated text.
    ///
    /// Implementations must reject unknown model identifiers before any
    /// network call is made.
    async fn invoke(&self, model_id: &str, prompt: &str) -> Result<String>;
}

/// One completed call to one backend model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInvocation {
    /// Model identifier the prompt was sent to.
    pub model_id: String,
    /// Prompt text.
    pub prompt: String,
    /// Raw generated text.
    pub response: String,
    /// Wall-clock duration of the call.
    pub elapsed: Duration,
}

impl ModelInvocation {
    /// Returns true if the backend produced no text.
    pub fn is_empty(&self) -> bool {
        self.response.trim().is_empty()
    }
}

/// Inference service wrapper with observability.
///
/// The provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct InferenceService {
    inner: Arc<dyn InferenceProvider>,
}

impl InferenceService {
    /// Creates a new inference service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: InferenceProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a service from an already shared provider.
    pub fn from_arc(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { inner: provider }
    }

    /// Invokes a model and records the call.
    pub async fn invoke(&self, model_id: &str, prompt: &str) -> Result<ModelInvocation> {
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_INFERENCE,
            model_id = %model_id,
            prompt_len = prompt.len(),
            "Invoking model"
        );

        let result = self.inner.invoke(model_id, prompt).await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET_INFERENCE,
                    model_id = %model_id,
                    response_len = response.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Model invocation successful"
                );

                Ok(ModelInvocation {
                    model_id: model_id.to_owned(),
                    prompt: prompt.to_owned(),
                    response,
                    elapsed,
                })
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_INFERENCE,
                    model_id = %model_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Model invocation failed"
                );

                Err(error)
            }
        }
    }
}

impl fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceService").finish_non_exhaustive()
    }
}
