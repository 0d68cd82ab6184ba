//! Storage backend factory.

use crate::traits::{Storage, StorageError, StorageResult};
use crate::{LocalStorage, S3Storage};
use resumevault_core::config::{Config, StorageBackend};
use std::sync::Arc;

/// Build the storage backend selected by configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET is required".to_string()))?;
            let region = config
                .s3_region()
                .ok_or_else(|| StorageError::ConfigError("S3_REGION is required".to_string()))?;
            let storage = S3Storage::new(
                bucket.to_string(),
                region.to_string(),
                config.s3_endpoint().map(String::from),
            )
            .await?;
            tracing::info!(bucket = %bucket, region = %region, "Using S3 storage backend");
            Ok(Arc::new(storage))
        }
        StorageBackend::Local => {
            let path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH is required".to_string())
            })?;
            let base_url = config.local_storage_base_url().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL is required".to_string())
            })?;
            let storage = LocalStorage::new(path, base_url.to_string()).await?;
            tracing::info!(path = %path, "Using local storage backend");
            Ok(Arc::new(storage))
        }
    }
}
