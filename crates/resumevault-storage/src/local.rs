use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation (development and tests).
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that would
    /// resolve outside the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if !crate::keys::validate_key(storage_key) {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn presigned_put_url(
        &self,
        _storage_key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::ConfigError(
            "Presigned uploads are not supported by local storage; use the direct upload endpoint"
                .to_string(),
        ))
    }

    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::info!(
            key = %storage_key,
            size_bytes = data.len(),
            "Local upload successful"
        );

        Ok(self.url_for_key(storage_key))
    }

    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(storage_key)?;

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_key.to_string()));
            }
            Err(e) => return Err(StorageError::DownloadFailed(e.to_string())),
        };

        let stream = futures::stream::once(async move { Ok(Bytes::from(data)) });
        Ok(Box::pin(stream))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn url_for_key(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    fn supports_presigned_upload(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn test_storage() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().expect("temp dir");
        let storage = LocalStorage::new(dir.path(), "http://localhost:3000/files".to_string())
            .await
            .expect("storage");
        (dir, storage)
    }

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.expect("chunk"));
        }
        out
    }

    #[tokio::test]
    async fn test_upload_download_roundtrip() {
        let (_dir, storage) = test_storage().await;
        let key = crate::keys::generate_resume_key(Uuid::new_v4(), "pdf");

        let url = storage
            .upload_with_key(&key, b"%PDF-1.4 test".to_vec(), "application/pdf")
            .await
            .expect("upload");
        assert_eq!(url, format!("http://localhost:3000/files/{}", key));

        let stream = storage.download_stream(&key).await.expect("download");
        assert_eq!(collect(stream).await, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_download_missing_key_is_not_found() {
        let (_dir, storage) = test_storage().await;
        let err = storage
            .download_stream("resumes/none/missing.pdf")
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let (_dir, storage) = test_storage().await;
        let key = crate::keys::generate_resume_key(Uuid::new_v4(), "pdf");
        storage
            .upload_with_key(&key, b"data".to_vec(), "application/pdf")
            .await
            .expect("upload");

        assert!(storage.exists(&key).await.expect("exists"));
        storage.delete(&key).await.expect("delete");
        assert!(!storage.exists(&key).await.expect("exists"));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let (_dir, storage) = test_storage().await;
        let err = storage
            .upload_with_key("resumes/../../etc/passwd", b"x".to_vec(), "application/pdf")
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_presigned_not_supported() {
        let (_dir, storage) = test_storage().await;
        assert!(!storage.supports_presigned_upload());
        let err = storage
            .presigned_put_url("resumes/a/b.pdf", "application/pdf", Duration::from_secs(60))
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, StorageError::ConfigError(_)));
    }
}
