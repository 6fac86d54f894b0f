//! Translation response types.

use serde::{Deserialize, Serialize};

/// Message returned when a required field is missing.
pub const MISSING_FIELDS: &str =
    "Missing required fields: sourceCode, sourceLang, targetLang, or UserID";

/// Message returned for any failure after validation.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// A stored translation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translated {
    /// Translated code.
    pub converted_code: String,
    /// Storage key of the persisted artifact.
    pub s3_key: String,
}

/// A failed translation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationFailure {
    /// Short description of the failure class.
    pub message: String,
    /// Failure detail, present for internal failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationFailure {
    /// Creates the response for a request with missing fields.
    pub fn missing_fields() -> Self {
        Self {
            message: MISSING_FIELDS.to_owned(),
            error: None,
        }
    }

    /// Creates the response for an internal failure.
    pub fn internal(error: impl ToString) -> Self {
        Self {
            message: INTERNAL_SERVER_ERROR.to_owned(),
            error: Some(error.to_string()),
        }
    }
}
