//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use resumevault_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ResumeVault API",
        version = "0.1.0",
        description = "Resume storage API (v0). Authenticated users upload PDF resumes \
                       via presigned URLs (or a direct upload fallback), tag them, list \
                       and search them, and download them through an ownership-enforcing \
                       gateway. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::upload_url::create_upload_url,
        handlers::direct_upload::direct_upload,
        handlers::resumes::register_resume,
        handlers::resumes::list_resumes,
        handlers::resumes::delete_resume,
        handlers::download::download_resume,
        handlers::users::current_user,
    ),
    components(
        schemas(
            models::UploadUrlRequest,
            models::UploadUrlResponse,
            models::DirectUploadResponse,
            models::CreateResumeRequest,
            models::ResumeResponse,
            models::UserResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Presigned upload URLs and the direct upload fallback"),
        (name = "resumes", description = "Resume registration, listing, search, deletion, and download"),
        (name = "users", description = "Authenticated user profile")
    )
)]
pub struct ApiDoc;
