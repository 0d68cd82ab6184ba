//! Resume Vault Storage Library
//!
//! Storage abstraction and backends for resume bytes: S3 (and S3-compatible
//! providers) and local filesystem.
//!
//! # Storage key format
//!
//! Keys are owner-scoped: `resumes/{owner_id}/{uuid}.{ext}`. The owner prefix
//! makes cross-user collisions impossible and lets the API verify that a
//! registered key belongs to the caller. Keys must not contain `..` or a
//! leading `/`. Key generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
