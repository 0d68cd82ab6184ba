//! Shared key generation for storage backends.
//!
//! Key format: `resumes/{owner_id}/{uuid}.{ext}`. The owner prefix plus a
//! random uniqueness token guarantees no two uploads ever target the same key,
//! across users or within one user's uploads.

use resumevault_core::constants::RESUME_KEY_PREFIX;
use uuid::Uuid;

/// Generate a fresh storage key for the given owner.
pub fn generate_resume_key(owner_id: Uuid, extension: &str) -> String {
    format!(
        "{}/{}/{}.{}",
        RESUME_KEY_PREFIX,
        owner_id,
        Uuid::new_v4(),
        extension
    )
}

/// The key prefix every upload for this owner must live under.
pub fn owner_prefix(owner_id: Uuid) -> String {
    format!("{}/{}/", RESUME_KEY_PREFIX, owner_id)
}

/// Whether a storage key lies under the owner's prefix.
pub fn key_owned_by(storage_key: &str, owner_id: Uuid) -> bool {
    storage_key.starts_with(&owner_prefix(owner_id))
}

/// Reject keys that could escape the storage root.
pub fn validate_key(storage_key: &str) -> bool {
    !storage_key.is_empty() && !storage_key.contains("..") && !storage_key.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_is_owner_scoped() {
        let owner = Uuid::new_v4();
        let key = generate_resume_key(owner, "pdf");
        assert!(key.starts_with(&format!("resumes/{}/", owner)));
        assert!(key.ends_with(".pdf"));
        assert!(key_owned_by(&key, owner));
    }

    #[test]
    fn test_keys_never_collide() {
        let owner = Uuid::new_v4();
        let a = generate_resume_key(owner, "pdf");
        let b = generate_resume_key(owner, "pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_foreign_key_rejected() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let key = generate_resume_key(other, "pdf");
        assert!(!key_owned_by(&key, owner));
        // A prefix that merely resembles another user's id must not match either.
        assert!(!key_owned_by("resumes/not-a-uuid/file.pdf", owner));
    }

    #[test]
    fn test_validate_key() {
        let owner = Uuid::new_v4();
        assert!(validate_key(&generate_resume_key(owner, "pdf")));
        assert!(!validate_key(""));
        assert!(!validate_key("/resumes/x.pdf"));
        assert!(!validate_key("resumes/../secrets.pdf"));
    }
}
