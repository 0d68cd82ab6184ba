//! Domain models shared across crates.

pub mod resume;
pub mod upload;
pub mod user;

pub use resume::{CreateResumeRequest, Resume, ResumeResponse};
pub use upload::{DirectUploadResponse, UploadUrlRequest, UploadUrlResponse};
pub use user::{User, UserResponse};
