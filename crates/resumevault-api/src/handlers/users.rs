use crate::auth::models::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use resumevault_core::models::UserResponse;
use resumevault_core::AppError;
use std::sync::Arc;

/// Profile of the authenticated user, read from the local mirror.
#[utoipa::path(
    get,
    path = "/api/v0/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %owner.user_id, operation = "current_user"))]
pub async fn current_user(
    owner: OwnerContext,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state
        .users
        .get(owner.user_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}
