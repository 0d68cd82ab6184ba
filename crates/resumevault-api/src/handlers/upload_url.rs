use crate::auth::models::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use resumevault_core::constants::UPLOAD_URL_EXPIRY_SECS;
use resumevault_core::models::{UploadUrlRequest, UploadUrlResponse};
use resumevault_core::validation::{file_extension, validate_content_type, validate_file_name};
use resumevault_core::AppError;
use resumevault_storage::keys;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

/// Authorize a direct-to-storage upload: derive an owner-scoped key and sign
/// a time-limited PUT URL for it. No metadata record is created here.
#[utoipa::path(
    post,
    path = "/api/v0/uploads/url",
    tag = "uploads",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Presigned upload URL generated", body = UploadUrlResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        user_id = %owner.user_id,
        content_type = %request.content_type,
        operation = "create_upload_url"
    )
)]
pub async fn create_upload_url(
    owner: OwnerContext,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    // Content type is checked before any key is derived: a rejected request
    // must not issue a storage key.
    validate_content_type(&request.content_type, state.config.allowed_content_types())?;
    validate_file_name(&request.file_name)?;

    if !state.storage.supports_presigned_upload() {
        return Err(HttpAppError(AppError::BadRequest(
            "Presigned uploads require the S3 storage backend; use the direct upload endpoint"
                .to_string(),
        )));
    }

    let extension = file_extension(&request.file_name);
    let file_key = keys::generate_resume_key(owner.user_id, &extension);

    let expires_in = Duration::from_secs(UPLOAD_URL_EXPIRY_SECS);
    let expires_at = Utc::now() + chrono::Duration::seconds(UPLOAD_URL_EXPIRY_SECS as i64);

    let upload_url = state
        .storage
        .presigned_put_url(&file_key, &request.content_type, expires_in)
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(
        user_id = %owner.user_id,
        file_key = %file_key,
        "Issued presigned upload URL"
    );

    Ok(Json(UploadUrlResponse {
        upload_url,
        file_key,
        expires_at,
    }))
}
