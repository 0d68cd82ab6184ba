//! Shared constants.

/// Prefix under which all resume objects live in the object store.
/// Keys are always `resumes/{owner_id}/{uuid}.{ext}` so no two users can
/// ever target the same key.
pub const RESUME_KEY_PREFIX: &str = "resumes";

/// Presigned upload URLs expire after this many seconds.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 15 * 60;

/// Cache directive for proxied downloads: private, one hour.
pub const DOWNLOAD_CACHE_CONTROL: &str = "private, max-age=3600";
