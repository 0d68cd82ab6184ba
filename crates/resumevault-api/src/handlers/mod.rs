pub mod direct_upload;
pub mod download;
pub mod resumes;
pub mod upload_url;
pub mod users;
