//! Service configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default primary model.
pub const DEFAULT_PRIMARY_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Model id prefix accepted by the translation route.
pub const TRANSLATION_MODEL_PREFIX: &str = "anthropic.claude";

/// Default cross-check model.
pub const DEFAULT_SECONDARY_MODEL: &str = "meta.llama3-70b-instruct-v1:0";

/// Model selection for the request handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Model producing the returned translation.
    #[cfg_attr(
        feature = "config",
        arg(long = "claude-model-id", env = "CLAUDE_MODEL_ID", default_value = DEFAULT_PRIMARY_MODEL)
    )]
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model cross-checking the primary translation on `/compare`.
    #[cfg_attr(
        feature = "config",
        arg(long = "llama-model-id", env = "LLAMA_MODEL_ID", default_value = DEFAULT_SECONDARY_MODEL)
    )]
    #[serde(default = "default_secondary_model")]
    pub secondary_model: String,
}

fn default_primary_model() -> String {
    DEFAULT_PRIMARY_MODEL.to_owned()
}

fn default_secondary_model() -> String {
    DEFAULT_SECONDARY_MODEL.to_owned()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            primary_model: default_primary_model(),
            secondary_model: default_secondary_model(),
        }
    }
}

impl ServiceConfig {
    /// Sets the primary model.
    pub fn with_primary_model(mut self, model_id: impl Into<String>) -> Self {
        self.primary_model = model_id.into();
        self
    }

    /// Sets the cross-check model.
    pub fn with_secondary_model(mut self, model_id: impl Into<String>) -> Self {
        self.secondary_model = model_id.into();
        self
    }

    /// Returns the primary model if the translation route can drive it.
    ///
    /// Translation only speaks the chat envelope, so anything outside the
    /// `anthropic.claude` family is rejected before a request is made.
    pub fn translation_model(&self) -> coderefactor_core::Result<&str> {
        if self.primary_model.starts_with(TRANSLATION_MODEL_PREFIX) {
            return Ok(&self.primary_model);
        }

        Err(coderefactor_core::Error::unsupported_model().with_message(format!(
            "translation requires an {TRANSLATION_MODEL_PREFIX} model, got {}",
            self.primary_model
        )))
    }
}
