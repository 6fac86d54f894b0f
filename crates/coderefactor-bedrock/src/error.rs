//! Internal error types for coderefactor-bedrock.

use thiserror::Error;

/// Result type alias for coderefactor-bedrock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for coderefactor-bedrock operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    /// Endpoint is not usable as a base URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Inference parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Runtime answered with a non-success status.
    #[error("Runtime returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
    /// Response envelope lacks the expected field.
    #[error("Malformed response: missing `{0}`")]
    MissingField(&'static str),
}

impl From<Error> for coderefactor_core::Error {
    fn from(err: Error) -> Self {
        use coderefactor_core::Error as CoreError;

        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    CoreError::network()
                        .with_message("Request timed out")
                        .with_source(e)
                } else if e.is_connect() {
                    CoreError::network()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    CoreError::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    CoreError::network()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => CoreError::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => CoreError::configuration()
                .with_message(e.to_string())
                .with_source(e),
            e @ (Error::InvalidEndpoint(_) | Error::InvalidParameter(_)) => {
                CoreError::configuration().with_message(e.to_string())
            }
            e @ Error::Status { .. } => CoreError::external().with_message(e.to_string()),
            e @ Error::MissingField(_) => CoreError::serialization().with_message(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use coderefactor_core::ErrorKind;

    use super::*;

    #[test]
    fn status_maps_to_external() {
        let error: coderefactor_core::Error = Error::Status {
            status: 403,
            body: "denied".to_owned(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.to_string().contains("403"));
    }

    #[test]
    fn decode_failure_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: coderefactor_core::Error = Error::from(source).into();
        assert_eq!(error.kind(), ErrorKind::Serialization);
        assert!(std::error::Error::source(&error).is_some());
    }
}
