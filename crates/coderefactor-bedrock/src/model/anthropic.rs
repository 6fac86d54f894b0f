//! Chat envelope for `anthropic.claude*` models.

use serde::{Deserialize, Serialize};

use super::InferenceParams;
use crate::error::{Error, Result};

/// API version pinned in every chat request.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaudeMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Chat request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaudeRequest<'a> {
    pub messages: Vec<ClaudeMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub anthropic_version: &'static str,
}

impl<'a> ClaudeRequest<'a> {
    /// Wraps `prompt` as a single user turn.
    pub fn new(prompt: &'a str, params: &InferenceParams) -> Self {
        Self {
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            anthropic_version: ANTHROPIC_VERSION,
        }
    }
}

/// One content block of a chat response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaudeContent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Chat response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaudeResponse {
    pub content: Vec<ClaudeContent>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl ClaudeResponse {
    /// Returns the text of the first content block.
    ///
    /// An empty content array yields an empty string.
    pub fn into_text(self) -> Result<String> {
        match self.content.into_iter().next() {
            None => Ok(String::new()),
            Some(block) => block.text.ok_or(Error::MissingField("content[0].text")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_without_text_is_malformed() {
        let response: ClaudeResponse =
            serde_json::from_str(r#"{"content":[{"type":"tool_use"}]}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(Error::MissingField("content[0].text"))
        ));
    }
}
