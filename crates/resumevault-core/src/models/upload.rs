use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to authorize a direct-to-storage upload.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UploadUrlRequest {
    /// Original filename (used only to derive the stored extension)
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// Content type (MIME type); only application/pdf is accepted
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
}

/// Response containing the presigned PUT URL and the key it targets.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadUrlResponse {
    /// Presigned URL for a direct PUT to the object store
    pub upload_url: String,
    /// Owner-scoped storage key the URL targets
    pub file_key: String,
    /// URL expiration time
    pub expires_at: DateTime<Utc>,
}

/// Response after a server-side (multipart) upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct DirectUploadResponse {
    pub file_key: String,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_upload_url_request_validation() {
        let valid = UploadUrlRequest {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = UploadUrlRequest {
            file_name: String::new(),
            content_type: "application/pdf".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }
}
