use resumevault_core::models::Resume;
use resumevault_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for resume metadata records.
#[derive(Clone)]
pub struct ResumeRepository {
    pool: PgPool,
}

/// Escape LIKE wildcards so a search for "100%" matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl ResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a resume record. Owner and file key are immutable afterwards;
    /// the `UNIQUE (file_key)` constraint rejects duplicate registration.
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        file_key: &str,
        file_url: &str,
        tags: &[String],
    ) -> Result<Resume, AppError> {
        // Dynamic SQLx queries to avoid requiring DATABASE_URL at compile time
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (id, owner_id, title, file_key, file_url, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, file_key, file_url, tags, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(title)
        .bind(file_key)
        .bind(file_url)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(resume)
    }

    /// Fetch a record by id, regardless of owner. Callers compare the owner
    /// themselves so delete can return 403 while download masks with 404.
    pub async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, owner_id, title, file_key, file_url, tags, created_at, updated_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    /// List the owner's resumes, newest first. `search` is a case-insensitive
    /// substring filter over the title and every tag.
    pub async fn list(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Resume>, AppError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let resumes = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, owner_id, title, file_key, file_url, tags, created_at, updated_at
            FROM resumes
            WHERE owner_id = $1
              AND (
                $2::text IS NULL
                OR title ILIKE $2
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $2)
              )
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(resumes)
    }

    /// Delete a record by id. Returns the number of rows removed (0 when the
    /// record vanished between the owner check and the delete).
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_substring() {
        assert_eq!(like_pattern("backend"), "%backend%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
    }
}
