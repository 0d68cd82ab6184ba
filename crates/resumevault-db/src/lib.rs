//! Resume Vault Database Library
//!
//! sqlx/Postgres repositories for resume and user records. Every query that
//! returns user data is owner-scoped; lookups that must distinguish "missing"
//! from "not yours" fetch by id and leave the owner comparison to the caller.

pub mod resumes;
pub mod users;

pub use resumes::ResumeRepository;
pub use users::UserRepository;
