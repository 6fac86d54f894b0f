//! Comparison response types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coderefactor_core::similarity::SimilarityScore;
use serde::{Deserialize, Serialize};

/// Message returned when the request lacks source code.
pub const MISSING_SOURCE_CODE: &str = "Missing 'source_code' in request";

/// Message returned when the two translations disagree.
pub const SIMILARITY_TOO_LOW: &str = "Similarity too low";

/// Outcome of a two-model comparison.
///
/// The body repeats the HTTP status as `statusCode`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Comparison {
    /// The translations agree; the primary one is returned.
    Agreed {
        #[serde(rename = "statusCode")]
        status_code: u16,
        similarity: SimilarityScore,
        java_code: String,
    },
    /// The translations disagree; both are returned.
    Diverged {
        #[serde(rename = "statusCode")]
        status_code: u16,
        message: String,
        similarity: SimilarityScore,
        java_claude: String,
        java_llama: String,
    },
    /// The request was rejected before any model call.
    Invalid {
        #[serde(rename = "statusCode")]
        status_code: u16,
        message: String,
    },
}

impl Comparison {
    /// Creates the response for agreeing translations.
    pub fn agreed(similarity: SimilarityScore, java_code: String) -> Self {
        Self::Agreed {
            status_code: StatusCode::OK.as_u16(),
            similarity,
            java_code,
        }
    }

    /// Creates the response for diverging translations.
    pub fn diverged(similarity: SimilarityScore, java_claude: String, java_llama: String) -> Self {
        Self::Diverged {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            message: SIMILARITY_TOO_LOW.to_owned(),
            similarity,
            java_claude,
            java_llama,
        }
    }

    /// Creates the response for a request without source code.
    pub fn missing_source_code() -> Self {
        Self::Invalid {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            message: MISSING_SOURCE_CODE.to_owned(),
        }
    }

    /// Returns the HTTP status of this outcome.
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Agreed { status_code, .. }
            | Self::Diverged { status_code, .. }
            | Self::Invalid { status_code, .. } => *status_code,
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Comparison {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
