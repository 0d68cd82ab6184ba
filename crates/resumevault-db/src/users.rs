use resumevault_core::models::User;
use resumevault_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for the local mirror of identity-provider users.
///
/// The identity provider owns this data; the only write is the upsert that
/// refreshes the mirror from verified token claims.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or refresh a user row from token claims.
    pub async fn upsert(
        &self,
        id: Uuid,
        email: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET email = EXCLUDED.email, name = EXCLUDED.name, updated_at = NOW()
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
