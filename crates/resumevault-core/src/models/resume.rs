use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A stored resume record.
///
/// Owner and file key are assigned once at registration and never mutated;
/// the database enforces `UNIQUE (file_key)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub file_key: String,
    pub file_url: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a resume after its bytes have been uploaded.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateResumeRequest {
    /// Display title for the resume
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    /// Storage key returned by the upload authorization step
    #[validate(length(min = 1, max = 1024, message = "File key must be between 1 and 1024 characters"))]
    pub file_key: String,
    /// Tags, kept in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Resume representation returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub title: String,
    pub file_key: String,
    pub file_url: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(resume: Resume) -> Self {
        ResumeResponse {
            id: resume.id,
            title: resume.title,
            file_key: resume.file_key,
            file_url: resume.file_url,
            tags: resume.tags,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_resume(tags: Vec<&str>) -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            file_key: "resumes/8c5f/abc.pdf".to_string(),
            file_url: "https://bucket.s3.us-east-1.amazonaws.com/resumes/8c5f/abc.pdf".to_string(),
            tags: tags.into_iter().map(String::from).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_response_from_resume_preserves_tag_order() {
        let resume = test_resume(vec!["go", "backend"]);
        let response = ResumeResponse::from(resume.clone());
        assert_eq!(response.id, resume.id);
        assert_eq!(response.title, "Backend Engineer");
        assert_eq!(response.tags, vec!["go", "backend"]);
    }

    #[test]
    fn test_response_omits_owner() {
        // The owner is implied by the authenticated session; the response body
        // carries no identity field.
        let resume = test_resume(vec![]);
        let json = serde_json::to_value(ResumeResponse::from(resume)).expect("serialize");
        assert!(json.get("owner_id").is_none());
        assert!(json.get("file_url").is_some());
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateResumeRequest {
            title: "Backend Engineer".to_string(),
            file_key: "resumes/8c5f/abc.pdf".to_string(),
            tags: vec![],
        };
        assert!(validator::Validate::validate(&valid).is_ok());

        let missing_title = CreateResumeRequest {
            title: String::new(),
            file_key: "resumes/8c5f/abc.pdf".to_string(),
            tags: vec![],
        };
        assert!(validator::Validate::validate(&missing_title).is_err());

        let missing_key = CreateResumeRequest {
            title: "Backend Engineer".to_string(),
            file_key: String::new(),
            tags: vec![],
        };
        assert!(validator::Validate::validate(&missing_key).is_err());
    }

    #[test]
    fn test_create_request_tags_default_empty() {
        let request: CreateResumeRequest =
            serde_json::from_str(r#"{"title":"CV","file_key":"resumes/a/b.pdf"}"#)
                .expect("deserialize");
        assert!(request.tags.is_empty());
    }
}
