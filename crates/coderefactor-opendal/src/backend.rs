//! Storage backend implementation.

use coderefactor_core::storage::{ArtifactStore, StorageProvider};
use opendal::{Operator, services};

use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Storage backend that wraps an OpenDAL operator.
#[derive(Debug, Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend_name(),
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Creates an in-memory backend.
    pub fn memory() -> StorageResult<Self> {
        Self::new(StorageConfig::Memory)
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Converts this backend into an [`ArtifactStore`].
    pub fn into_store(self) -> ArtifactStore {
        ArtifactStore::new(self)
    }

    /// Reads an object from storage.
    pub async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "Reading object"
        );

        let data = self.operator.read(path).await?.to_vec();

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Object read complete"
        );

        Ok(data)
    }

    /// Writes an object to storage.
    pub async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Writing object"
        );

        self.operator.write(path, data).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "Object write complete"
        );

        Ok(())
    }

    /// Checks if an object exists.
    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.operator.exists(path).await?)
    }

    /// Creates an OpenDAL operator based on configuration.
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config {
            #[cfg(feature = "s3")]
            StorageConfig::S3(s3) => {
                if s3.bucket.trim().is_empty() {
                    return Err(StorageError::init("S3 bucket name is required"));
                }

                let mut builder = services::S3::default()
                    .bucket(&s3.bucket)
                    .region(&s3.region);

                if let Some(ref endpoint) = s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref access_key_id) = s3.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }

                if let Some(ref secret_access_key) = s3.secret_access_key {
                    builder = builder.secret_access_key(secret_access_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(not(feature = "s3"))]
            StorageConfig::S3(_) => Err(StorageError::init(
                "S3 backend is not supported with current features",
            )),

            StorageConfig::Memory => Operator::new(services::Memory::default())
                .map(|op| op.finish())
                .map_err(|e| StorageError::init(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl StorageProvider for StorageBackend {
    async fn write(&self, key: &str, data: Vec<u8>) -> coderefactor_core::Result<()> {
        Ok(StorageBackend::write(self, key, data).await?)
    }
}

#[cfg(test)]
mod tests {
    use coderefactor_core::ErrorKind;

    use super::*;
    use crate::config::S3Config;

    #[tokio::test]
    async fn memory_write_and_read() -> StorageResult<()> {
        let backend = StorageBackend::memory()?;

        backend.write("u/2024-01-01/a.txt", b"hello".to_vec()).await?;

        assert!(backend.exists("u/2024-01-01/a.txt").await?);
        assert_eq!(backend.read("u/2024-01-01/a.txt").await?, b"hello");
        Ok(())
    }

    #[tokio::test]
    async fn missing_object_is_not_found() -> StorageResult<()> {
        let backend = StorageBackend::memory()?;
        let error = backend.read("absent.txt").await.unwrap_err();
        assert!(matches!(error, StorageError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn artifact_store_round_trip() -> coderefactor_core::Result<()> {
        let backend = StorageBackend::memory()?;
        let store = backend.clone().into_store();

        let stored = store.store("bob", "rust", "fn main() {}").await?;
        assert!(stored.key.starts_with("bob/"));
        assert!(stored.key.ends_with(".txt"));

        let blob = backend.read(&stored.key).await?;
        let blob = String::from_utf8(blob).unwrap();
        assert!(blob.starts_with("UserID: bob\nTimestamp: "));
        assert!(blob.ends_with("TargetLang: rust\nCode:\nfn main() {}"));
        Ok(())
    }

    #[cfg(feature = "s3")]
    #[test]
    fn rejects_empty_bucket() {
        let config = StorageConfig::S3(S3Config::new("", "us-east-1"));
        let error = StorageBackend::new(config).unwrap_err();
        let error: coderefactor_core::Error = error.into();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[cfg(not(feature = "s3"))]
    #[test]
    fn s3_requires_feature() {
        let config = StorageConfig::S3(S3Config::new("artifacts", "us-east-1"));
        let error: coderefactor_core::Error = StorageBackend::new(config).unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
