//! Completion envelope for `meta.llama3*` models.

use serde::{Deserialize, Serialize};

use super::InferenceParams;

/// Completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlamaRequest<'a> {
    pub prompt: &'a str,
    pub max_gen_len: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl<'a> LlamaRequest<'a> {
    /// Builds a completion request for `prompt`.
    pub fn new(prompt: &'a str, params: &InferenceParams) -> Self {
        Self {
            prompt,
            max_gen_len: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

/// Completion response body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LlamaResponse {
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl LlamaResponse {
    /// Returns the generated text, empty when absent.
    pub fn into_text(self) -> String {
        self.generation.unwrap_or_default()
    }
}
