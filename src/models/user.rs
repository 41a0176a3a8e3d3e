//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown to the admin, e.g. `Anna (@anna)`
    pub fn display_name(&self) -> String {
        display_name(self.user_id, Some(&self.first_name), self.username.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

impl CreateUserRequest {
    pub fn display_name(&self) -> String {
        display_name(self.user_id, Some(&self.first_name), self.username.as_deref())
    }
}

impl From<&teloxide::types::User> for CreateUserRequest {
    fn from(user: &teloxide::types::User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
        }
    }
}

/// Build a display name from whatever profile fields are known
pub fn display_name(user_id: i64, first_name: Option<&str>, username: Option<&str>) -> String {
    let base = match first_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("id {}", user_id),
    };

    match username {
        Some(handle) if !handle.is_empty() => format!("{} (@{})", base, handle),
        _ => base,
    }
}
