//! Upload input validation.
//!
//! Content-type and filename checks shared by the upload-authorization and
//! direct-upload paths. The storage key itself is derived server-side, so the
//! filename only contributes an extension, but it still must not smuggle path
//! segments.

use crate::AppError;

/// Reject content types outside the configured allowlist.
pub fn validate_content_type(content_type: &str, allowed: &[String]) -> Result<(), AppError> {
    let normalized = content_type.trim().to_lowercase();
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(&normalized)) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "Content type '{}' is not accepted; allowed: {}",
            content_type,
            allowed.join(", ")
        )))
    }
}

/// Reject titles that are empty after trimming. Length bounds are enforced by
/// the request validator; this catches whitespace-only titles that would
/// otherwise trip the database check constraint.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Title must not be blank".to_string(),
        ));
    }
    Ok(())
}

/// Reject filenames that are empty, oversized, or contain path separators.
pub fn validate_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.is_empty() {
        return Err(AppError::InvalidInput("Filename is required".to_string()));
    }
    if file_name.len() > 255 {
        return Err(AppError::InvalidInput(
            "Filename exceeds 255 characters".to_string(),
        ));
    }
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename must not contain path separators".to_string(),
        ));
    }
    Ok(())
}

/// Extension of a filename, lowercased; "pdf" when absent.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "pdf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_only() -> Vec<String> {
        vec!["application/pdf".to_string()]
    }

    #[test]
    fn test_pdf_accepted() {
        assert!(validate_content_type("application/pdf", &pdf_only()).is_ok());
        assert!(validate_content_type("Application/PDF", &pdf_only()).is_ok());
    }

    #[test]
    fn test_png_rejected() {
        let err = validate_content_type("image/png", &pdf_only()).unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("image/png")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(validate_title("Backend Engineer").is_ok());
        assert!(validate_title("  padded  ").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("\t\n").is_err());
    }

    #[test]
    fn test_file_name_rules() {
        assert!(validate_file_name("cv.pdf").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("a/b.pdf").is_err());
        assert!(validate_file_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("cv.pdf"), "pdf");
        assert_eq!(file_extension("CV.PDF"), "pdf");
        assert_eq!(file_extension("resume"), "pdf");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
    }
}
