use crate::auth::models::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use resumevault_core::models::DirectUploadResponse;
use resumevault_core::validation::{file_extension, validate_content_type, validate_file_name};
use resumevault_core::AppError;
use resumevault_storage::keys;
use std::sync::Arc;

/// Server-side upload fallback for backends without presigned URLs. Bytes
/// pass through the application server, so the multipart field is bounded by
/// the configured size limit.
#[utoipa::path(
    post,
    path = "/api/v0/resumes/file",
    tag = "uploads",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = DirectUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 413, description = "File exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %owner.user_id, operation = "direct_upload")
)]
pub async fn direct_upload(
    owner: OwnerContext,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| AppError::InvalidInput("Missing 'file' field".to_string()))?;

    if field.name() != Some("file") {
        return Err(HttpAppError(AppError::InvalidInput(
            "Expected a 'file' field".to_string(),
        )));
    }

    let file_name = field
        .file_name()
        .map(String::from)
        .ok_or_else(|| AppError::InvalidInput("Missing file name".to_string()))?;
    let content_type = field
        .content_type()
        .map(String::from)
        .ok_or_else(|| AppError::InvalidInput("Missing content type".to_string()))?;

    validate_content_type(&content_type, state.config.allowed_content_types())?;
    validate_file_name(&file_name)?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

    let max_size = state.config.max_resume_size_bytes();
    if data.len() > max_size {
        return Err(HttpAppError(AppError::PayloadTooLarge(format!(
            "File is {} bytes; the limit is {} bytes",
            data.len(),
            max_size
        ))));
    }
    if data.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "File is empty".to_string(),
        )));
    }

    let extension = file_extension(&file_name);
    let file_key = keys::generate_resume_key(owner.user_id, &extension);

    let file_url = state
        .storage
        .upload_with_key(&file_key, data.to_vec(), &content_type)
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(
        user_id = %owner.user_id,
        file_key = %file_key,
        size = data.len(),
        "Stored uploaded file"
    );

    Ok(Json(DirectUploadResponse { file_key, file_url }))
}
