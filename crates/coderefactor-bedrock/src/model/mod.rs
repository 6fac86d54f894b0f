//! Model families and their wire envelopes.
//!
//! Each family pairs a request encoder with a response decoder. The family
//! is chosen by model identifier prefix; adding a backend means adding a
//! variant here and a module next to this one.

mod anthropic;
mod llama;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

pub use self::anthropic::{
    ANTHROPIC_VERSION, ClaudeContent, ClaudeMessage, ClaudeRequest, ClaudeResponse,
};
pub use self::llama::{LlamaRequest, LlamaResponse};
use crate::BedrockConfig;
use crate::error::Result;

/// Sampling parameters shared by every family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    /// Maximum number of generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling mass.
    pub top_p: f32,
}

impl From<&BedrockConfig> for InferenceParams {
    fn from(config: &BedrockConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self::from(&BedrockConfig::default())
    }
}

/// Supported model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ModelFamily {
    /// Chat-style models, `anthropic.claude*`.
    Anthropic,
    /// Completion-style models, `meta.llama3*`.
    Llama,
}

impl ModelFamily {
    /// Returns the model identifier prefix owned by this family.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic.claude",
            Self::Llama => "meta.llama3",
        }
    }

    /// Finds the family owning `model_id`.
    pub fn lookup(model_id: &str) -> Option<Self> {
        Self::iter().find(|family| model_id.starts_with(family.prefix()))
    }

    /// Encodes the request body for `prompt`.
    pub fn encode(self, prompt: &str, params: &InferenceParams) -> Result<Vec<u8>> {
        let body = match self {
            Self::Anthropic => serde_json::to_vec(&ClaudeRequest::new(prompt, params))?,
            Self::Llama => serde_json::to_vec(&LlamaRequest::new(prompt, params))?,
        };
        Ok(body)
    }

    /// Decodes generated text from a response body.
    pub fn decode(self, body: &[u8]) -> Result<String> {
        match self {
            Self::Anthropic => serde_json::from_slice::<ClaudeResponse>(body)?.into_text(),
            Self::Llama => Ok(serde_json::from_slice::<LlamaResponse>(body)?.into_text()),
        }
    }
}
