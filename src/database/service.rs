//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, SettingsRepository, SubmissionRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::NewsRelayError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub settings: SettingsRepository,
    pub users: UserRepository,
    pub submissions: SubmissionRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            settings: SettingsRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            submissions: SubmissionRepository::new(pool),
        }
    }

    /// Make sure the user has a row so submissions can reference it
    pub async fn register_user(&self, request: CreateUserRequest) -> Result<(), NewsRelayError> {
        let user_id = request.user_id;
        if self.users.add_user(request).await? {
            tracing::info!(user_id = user_id, "New user registered");
        }
        Ok(())
    }

    /// Whether `user_id` is the configured admin; read fresh on every call
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, NewsRelayError> {
        Ok(self.settings.get_admin_id().await? == Some(user_id))
    }

    /// Bot-wide statistics
    pub async fn bot_stats(&self) -> Result<BotStats, NewsRelayError> {
        Ok(BotStats {
            users: self.users.count().await?,
            banned_users: self.users.count_banned().await?,
            submissions: self.submissions.count_by_status().await?,
        })
    }
}
