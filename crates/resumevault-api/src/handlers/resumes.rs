use crate::auth::models::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use resumevault_core::models::{CreateResumeRequest, Resume, ResumeResponse};
use resumevault_core::validation::validate_title;
use resumevault_core::AppError;
use resumevault_storage::keys;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring filter over title and tags
    pub q: Option<String>,
}

/// Constraint name from the initial migration's `UNIQUE (file_key)`.
const FILE_KEY_UNIQUE_CONSTRAINT: &str = "resumes_file_key_key";

/// Map a duplicate file key to 400; every other database failure stays a 500.
fn map_create_error(err: AppError) -> HttpAppError {
    match &err {
        AppError::Database(db_err)
            if db_err.as_database_error().and_then(|d| d.constraint())
                == Some(FILE_KEY_UNIQUE_CONSTRAINT) =>
        {
            HttpAppError(AppError::BadRequest(
                "File key is already registered".to_string(),
            ))
        }
        _ => HttpAppError(err),
    }
}

/// Owner gate for deletion: a missing record is 404; someone else's record is
/// 403 and must stay untouched (the repository delete only runs on `Ok`).
fn authorize_delete(resume: Option<Resume>, user_id: Uuid) -> Result<Resume, AppError> {
    let resume = resume.ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    if resume.owner_id != user_id {
        return Err(AppError::Forbidden(
            "Resume belongs to another user".to_string(),
        ));
    }
    Ok(resume)
}

/// Register resume metadata after the bytes have been uploaded. Final step of
/// the upload choreography; existence of the record does not guarantee the
/// bytes arrived (accepted inconsistency, no cross-store transaction).
#[utoipa::path(
    post,
    path = "/api/v0/resumes",
    tag = "resumes",
    request_body = CreateResumeRequest,
    responses(
        (status = 201, description = "Resume registered", body = ResumeResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "File key belongs to another user", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(user_id = %owner.user_id, operation = "register_resume")
)]
pub async fn register_resume(
    owner: OwnerContext,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateResumeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    validate_title(&request.title)?;

    if !keys::validate_key(&request.file_key) {
        return Err(HttpAppError(AppError::InvalidInput(
            "Invalid file key".to_string(),
        )));
    }

    // A signed upload URL is always issued under the caller's own prefix;
    // registering a key outside it would attach someone else's bytes.
    if !keys::key_owned_by(&request.file_key, owner.user_id) {
        return Err(HttpAppError(AppError::Forbidden(
            "File key does not belong to the authenticated user".to_string(),
        )));
    }

    let file_url = state.storage.url_for_key(&request.file_key);

    let resume = state
        .resumes
        .create(
            owner.user_id,
            request.title.trim(),
            &request.file_key,
            &file_url,
            &request.tags,
        )
        .await
        .map_err(map_create_error)?;

    tracing::info!(
        user_id = %owner.user_id,
        resume_id = %resume.id,
        file_key = %resume.file_key,
        "Resume registered"
    );

    Ok((StatusCode::CREATED, Json(ResumeResponse::from(resume))))
}

/// List the caller's resumes, newest first, optionally filtered by `q`.
#[utoipa::path(
    get,
    path = "/api/v0/resumes",
    tag = "resumes",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring filter over title and tags")
    ),
    responses(
        (status = 200, description = "Resumes owned by the caller", body = [ResumeResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params),
    fields(user_id = %owner.user_id, operation = "list_resumes")
)]
pub async fn list_resumes(
    owner: OwnerContext,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let resumes = state
        .resumes
        .list(owner.user_id, params.q.as_deref())
        .await
        .map_err(HttpAppError::from)?;

    let response: Vec<ResumeResponse> = resumes.into_iter().map(ResumeResponse::from).collect();
    Ok(Json(response))
}

/// Delete a resume. 404 when the record does not exist, 403 when it belongs
/// to someone else. Metadata and bytes are removed as one logical operation;
/// a failed bytes deletion is logged and does not fail the request.
#[utoipa::path(
    delete,
    path = "/api/v0/resumes/{id}",
    tag = "resumes",
    params(
        ("id" = Uuid, Path, description = "Resume ID")
    ),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Resume owned by another user", body = ErrorResponse),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(user_id = %owner.user_id, resume_id = %id, operation = "delete_resume")
)]
pub async fn delete_resume(
    owner: OwnerContext,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.resumes.get(id).await.map_err(HttpAppError::from)?;
    let resume = authorize_delete(record, owner.user_id)?;

    state.resumes.delete(id).await.map_err(HttpAppError::from)?;

    // Best-effort bytes cleanup; an orphan object is preferable to a failed
    // delete, and a later sweep can reclaim it.
    if let Err(e) = state.storage.delete(&resume.file_key).await {
        tracing::warn!(
            error = %e,
            resume_id = %id,
            file_key = %resume.file_key,
            "Failed to delete stored bytes; metadata removed"
        );
    }

    tracing::info!(user_id = %owner.user_id, resume_id = %id, "Resume deleted");

    Ok(StatusCode::NO_CONTENT)
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
            tags: vec!["go".to_string(), "backend".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_delete_of_missing_record_is_not_found() {
        let err = authorize_delete(None, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_delete_of_foreign_record_is_forbidden() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let err = authorize_delete(Some(stored_resume(owner)), caller).unwrap_err();
        // The gate rejects before any repository or storage call, so the
        // record and its bytes stay in place.
        assert_eq!(err.http_status_code(), 403);
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_delete_of_owned_record_is_allowed() {
        let owner = Uuid::new_v4();
        let resume = stored_resume(owner);
        let id = resume.id;
        let authorized = authorize_delete(Some(resume), owner).expect("owned record");
        assert_eq!(authorized.id, id);
    }

    #[test]
    fn test_non_constraint_database_error_stays_internal() {
        let HttpAppError(err) = map_create_error(AppError::from(sqlx::Error::PoolClosed));
        assert_eq!(err.http_status_code(), 500);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_non_database_error_passes_through() {
        let HttpAppError(err) =
            map_create_error(AppError::Forbidden("not yours".to_string()));
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
