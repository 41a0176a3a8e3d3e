//! User repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::NewsRelayError;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a user if unknown; existing rows keep their first recorded profile
    ///
    /// Returns `true` when a new row was inserted.
    pub async fn add_user(&self, request: CreateUserRequest) -> Result<bool, NewsRelayError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (user_id, username, first_name, is_banned, created_at)
            VALUES (?, ?, ?, 0, ?)
            "#
        )
        .bind(request.user_id)
        .bind(request.username)
        .bind(request.first_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find user by Telegram ID
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, NewsRelayError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, first_name, is_banned, created_at FROM users WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Whether the user is banned; unknown users are not
    pub async fn is_banned(&self, user_id: i64) -> Result<bool, NewsRelayError> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT is_banned FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(banned,)| banned).unwrap_or(false))
    }

    /// Ban/unban user
    ///
    /// Returns `false` when the user is unknown.
    pub async fn set_ban_status(&self, user_id: i64, is_banned: bool) -> Result<bool, NewsRelayError> {
        let result = sqlx::query("UPDATE users SET is_banned = ? WHERE user_id = ?")
            .bind(is_banned)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, NewsRelayError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count banned users
    pub async fn count_banned(&self) -> Result<i64, NewsRelayError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_banned = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
