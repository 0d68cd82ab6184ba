//! Authentication middleware.
//!
//! Verifies the Bearer session token on every protected route, refreshes the
//! local user mirror from the claims, and injects [`OwnerContext`] into
//! request extensions for handler extraction.

use crate::auth::jwt::decode_token;
use crate::auth::models::OwnerContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use resumevault_core::AppError;
use resumevault_db::UserRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub users: UserRepository,
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match decode_token(&auth_state.jwt_secret, token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    // Keep the read-only user mirror current; identity data is owned by the
    // provider and only echoed here.
    let user = match auth_state
        .users
        .upsert(claims.sub, &claims.email, claims.name.as_deref())
        .await
    {
        Ok(user) => user,
        Err(err) => {
            tracing::error!(error = %err, user_id = %claims.sub, "Failed to refresh user mirror");
            return HttpAppError(err).into_response();
        }
    };

    tracing::debug!(user_id = %user.id, "Authenticated request");

    request.extensions_mut().insert(OwnerContext {
        user_id: user.id,
        email: user.email,
        name: user.name,
    });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-test-secret-test-secret-42";

    /// Router with the auth layer over a dummy handler. The pool is lazy and
    /// never connects; every request here must be rejected before any
    /// database call.
    fn protected_router() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost:1/unreachable")
            .expect("lazy pool");
        let auth_state = Arc::new(AuthState {
            jwt_secret: SECRET.to_string(),
            users: UserRepository::new(pool),
        });
        Router::new()
            .route("/api/v0/resumes", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                auth_middleware,
            ))
    }

    async fn status_for(request: Request<Body>) -> StatusCode {
        protected_router()
            .oneshot(request)
            .await
            .expect("response")
            .status()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/v0/resumes")
            .body(Body::empty())
            .expect("request");
        assert_eq!(status_for(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/v0/resumes")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .expect("request");
        assert_eq!(status_for(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/v0/resumes")
            .header("Authorization", "Bearer not.a.token")
            .body(Body::empty())
            .expect("request");
        assert_eq!(status_for(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthorized() {
        let claims = crate::auth::models::SessionClaims {
            sub: uuid::Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            name: None,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = crate::auth::jwt::encode_token("another-secret-another-secret-42", &claims)
            .expect("token");
        let request = Request::builder()
            .uri("/api/v0/resumes")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .expect("request");
        assert_eq!(status_for(request).await, StatusCode::UNAUTHORIZED);
    }
}
