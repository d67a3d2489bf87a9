//! User repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::User};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, password_hash, role FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find the user currently holding an access token
    pub async fn find_by_token_hash(pool: &PgPool, token_hash: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, password_hash, role FROM users WHERE access_token_hash = $1"#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Store (or clear) the user's access token hash
    pub async fn set_token_hash(pool: &PgPool, id: &str, token_hash: Option<&str>) -> AppResult<()> {
        sqlx::query(r#"UPDATE users SET access_token_hash = $2 WHERE id = $1"#)
            .bind(id)
            .bind(token_hash)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Clear whichever user holds the token; returns whether one did
    pub async fn clear_token_hash(pool: &PgPool, token_hash: &str) -> AppResult<bool> {
        let cleared = sqlx::query(
            r#"UPDATE users SET access_token_hash = NULL WHERE access_token_hash = $1"#,
        )
        .bind(token_hash)
        .execute(pool)
        .await?;

        Ok(cleared.rows_affected() > 0)
    }
}
