//! Core error to HTTP error conversion.

use coderefactor_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for core error conversions.
const TRACING_TARGET: &str = "coderefactor_server::handler::error";

impl From<coderefactor_core::Error> for HttpError<'static> {
    fn from(error: coderefactor_core::Error) -> Self {
        match error.kind() {
            CoreErrorKind::Validation => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Invalid input"
                );
            }
            CoreErrorKind::Network | CoreErrorKind::External => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind_str(),
                    "Upstream request failed"
                );
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind_str(),
                    "Request processing failed"
                );
            }
        }

        let kind = match error.kind() {
            CoreErrorKind::Validation => ErrorKind::BadRequest,
            _ => ErrorKind::InternalServerError,
        };

        kind.with_message(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let error: HttpError = coderefactor_core::Error::validation()
            .with_message("missing field")
            .into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn everything_else_is_internal() {
        for core in [
            coderefactor_core::Error::unsupported_model(),
            coderefactor_core::Error::empty_response(),
            coderefactor_core::Error::storage_write(),
            coderefactor_core::Error::network(),
            coderefactor_core::Error::serialization(),
            coderefactor_core::Error::configuration(),
            coderefactor_core::Error::external(),
        ] {
            let error: HttpError = core.into();
            assert_eq!(error.kind(), ErrorKind::InternalServerError);
        }
    }
}
