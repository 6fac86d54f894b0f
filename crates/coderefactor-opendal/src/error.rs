//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Object not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(#[source] opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}

impl From<StorageError> for coderefactor_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Init(msg) => coderefactor_core::Error::configuration().with_message(msg),
            other => coderefactor_core::Error::storage_write()
                .with_message(other.to_string())
                .with_source(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use coderefactor_core::ErrorKind;

    use super::*;

    #[test]
    fn maps_into_core_kinds() {
        let init: coderefactor_core::Error = StorageError::init("no bucket").into();
        assert_eq!(init.kind(), ErrorKind::Configuration);

        let denied: coderefactor_core::Error =
            StorageError::PermissionDenied("artifacts/x.txt".to_owned()).into();
        assert_eq!(denied.kind(), ErrorKind::StorageWrite);
        assert!(std::error::Error::source(&denied).is_some());
    }

    #[test]
    fn backend_error_stays_in_source_chain() {
        let err = StorageError::from(opendal::Error::new(
            opendal::ErrorKind::Unexpected,
            "connection reset",
        ));
        assert!(matches!(err, StorageError::Backend(_)));

        let backend = std::error::Error::source(&err).expect("backend source");
        assert!(backend.to_string().contains("connection reset"));

        let core: coderefactor_core::Error = err.into();
        let storage = std::error::Error::source(&core).expect("storage source");
        assert!(std::error::Error::source(storage).is_some());
    }
}
