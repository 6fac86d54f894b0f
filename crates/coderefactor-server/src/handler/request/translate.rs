//! Translation request types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for the translation endpoint.
///
/// Every field is optional at the wire level so that missing fields can be
/// reported together.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateCode {
    /// Source code to translate.
    #[serde(default)]
    pub source_code: Option<String>,
    /// Language of the source code.
    #[serde(default)]
    pub source_lang: Option<String>,
    /// Language to translate into.
    #[serde(default)]
    pub target_lang: Option<String>,
    /// Requesting user.
    #[serde(default, rename = "UserID")]
    pub user_id: Option<String>,
}

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source_code: String,
    pub source_lang: String,
    pub target_lang: String,
    pub user_id: String,
}

impl TranslateCode {
    /// Parses the request body.
    ///
    /// The payload may arrive wrapped as `{"body": "<json>"}`, as forwarded
    /// by API gateways; the wrapped document is parsed in that case.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)?;
        match value.get("body") {
            Some(Value::String(inner)) => serde_json::from_str(inner),
            Some(inner @ Value::Object(_)) => serde_json::from_value(inner.clone()),
            _ => serde_json::from_value(value),
        }
    }

    /// Returns the validated request, or `None` if any field is missing or empty.
    pub fn into_translation(self) -> Option<Translation> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|value| !value.is_empty())
        }

        Some(Translation {
            source_code: present(self.source_code)?,
            source_lang: present(self.source_lang)?,
            target_lang: present(self.target_lang)?,
            user_id: present(self.user_id)?,
        })
    }
}
