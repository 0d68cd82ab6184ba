use crate::auth::models::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;
use resumevault_core::constants::DOWNLOAD_CACHE_CONTROL;
use resumevault_core::models::Resume;
use resumevault_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Content type served for stored resumes. The upload paths only accept the
/// PDF allowlist, so every stored object is a PDF.
const RESUME_CONTENT_TYPE: &str = "application/pdf";

fn content_disposition(file_key: &str) -> String {
    let basename = file_key.rsplit('/').next().unwrap_or("resume.pdf");
    format!("inline; filename=\"{}\"", basename)
}

/// Owner gate for downloads: a missing record and a record owned by another
/// user produce the same 404, and a foreign record never reaches storage
/// (storage is only contacted after this returns `Ok`).
fn resolve_owned(resume: Option<Resume>, user_id: Uuid) -> Result<Resume, AppError> {
    resume
        .filter(|r| r.owner_id == user_id)
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

/// Ownership-gated download proxy. The object store is never exposed for
/// reads; a record owned by another user is indistinguishable from a missing
/// one, and in neither case is storage contacted.
#[utoipa::path(
    get,
    path = "/api/v0/resumes/{id}/file",
    tag = "resumes",
    params(
        ("id" = Uuid, Path, description = "Resume ID")
    ),
    responses(
        (status = 200, description = "Resume file", content_type = "application/pdf"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Resume not found or not owned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(user_id = %owner.user_id, resume_id = %id, operation = "download_resume")
)]
pub async fn download_resume(
    owner: OwnerContext,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.resumes.get(id).await.map_err(HttpAppError::from)?;
    let resume = resolve_owned(record, owner.user_id)?;

    tracing::debug!(
        resume_id = %id,
        file_key = %resume.file_key,
        "Proxying resume from storage"
    );

    let stream = state
        .storage
        .download_stream(&resume.file_key)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to download from storage: {}", e)))?;

    // Wrap the storage stream for the axum body
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, RESUME_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&resume.file_key).as_str(),
        )
        .header(header::CACHE_CONTROL, DOWNLOAD_CACHE_CONTROL)
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use resumevault_core::ErrorMetadata;

    fn stored_resume(owner_id: Uuid) -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            owner_id,
            title: "Backend Engineer".to_string(),
            file_key: format!("resumes/{}/abc.pdf", owner_id),
            file_url: "https://bucket.s3.us-east-1.amazonaws.com/abc.pdf".to_string(),
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_content_disposition_uses_key_basename() {
        assert_eq!(
            content_disposition("resumes/8c5f/abc.pdf"),
            "inline; filename=\"abc.pdf\""
        );
    }

    #[test]
    fn test_cache_directive_is_private_one_hour() {
        assert_eq!(DOWNLOAD_CACHE_CONTROL, "private, max-age=3600");
    }

    #[test]
    fn test_owned_record_resolves() {
        let owner = Uuid::new_v4();
        let resume = stored_resume(owner);
        let id = resume.id;
        let resolved = resolve_owned(Some(resume), owner).expect("owned record");
        assert_eq!(resolved.id, id);
    }

    #[test]
    fn test_foreign_record_masked_as_not_found() {
        let caller = Uuid::new_v4();
        let err = resolve_owned(Some(stored_resume(Uuid::new_v4())), caller).unwrap_err();
        assert_eq!(err.http_status_code(), 404);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_missing_and_foreign_are_indistinguishable() {
        let caller = Uuid::new_v4();
        let missing = resolve_owned(None, caller).unwrap_err();
        let foreign = resolve_owned(Some(stored_resume(Uuid::new_v4())), caller).unwrap_err();
        // Same status, same message: no existence oracle for other users' records.
        assert_eq!(missing.http_status_code(), foreign.http_status_code());
        assert_eq!(missing.client_message(), foreign.client_message());
    }
}
