//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of structured errors so the underlying transport or
/// storage failure is preserved for logging.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while translating code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Required input fields are missing or empty.
    Validation,
    /// The model identifier matches no known backend family.
    UnsupportedModel,
    /// The backend returned no usable text.
    EmptyResponse,
    /// Writing an artifact to object storage failed.
    StorageWrite,
    /// Network-related error occurred.
    Network,
    /// Serialization/deserialization error.
    Serialization,
    /// Configuration error.
    Configuration,
    /// External service returned an error.
    External,
}

/// A structured error type for coderefactor operations.
#[derive(Debug, Error)]
#[error("{kind:?}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new validation error.
    pub fn validation() -> Self {
        Self::new(ErrorKind::Validation)
    }

    /// Creates a new unsupported model error.
    pub fn unsupported_model() -> Self {
        Self::new(ErrorKind::UnsupportedModel)
    }

    /// Creates a new empty response error.
    pub fn empty_response() -> Self {
        Self::new(ErrorKind::EmptyResponse)
    }

    /// Creates a new storage write error.
    pub fn storage_write() -> Self {
        Self::new(ErrorKind::StorageWrite)
    }

    /// Creates a new network error.
    pub fn network() -> Self {
        Self::new(ErrorKind::Network)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new external error.
    pub fn external() -> Self {
        Self::new(ErrorKind::External)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}
