//! Authentication service implementation
//!
//! There is exactly one administrator, stored in the settings table. The
//! check is read from the database on every call so a newly claimed admin
//! takes effect immediately.

use tracing::{debug, warn};
use crate::database::DatabaseService;
use crate::utils::errors::{NewsRelayError, Result};

#[derive(Clone, Debug)]
pub struct AuthService {
    database: DatabaseService,
}

impl AuthService {
    pub fn new(database: DatabaseService) -> Self {
        Self { database }
    }

    /// Check if user is the bot admin
    pub async fn is_admin(&self, user_id: i64) -> Result<bool> {
        let is_admin = self.database.is_admin(user_id).await?;
        debug!(user_id = user_id, is_admin = is_admin, "Admin check");
        Ok(is_admin)
    }

    /// Fail with `PermissionDenied` unless the user is the admin
    pub async fn require_admin(&self, user_id: i64, action: &str) -> Result<()> {
        if self.is_admin(user_id).await? {
            Ok(())
        } else {
            warn!(user_id = user_id, action = action, "Non-admin attempted an admin action");
            Err(NewsRelayError::PermissionDenied(format!(
                "user {} may not {}",
                user_id, action
            )))
        }
    }

    /// Whether an admin has been configured at all
    pub async fn has_admin(&self) -> Result<bool> {
        Ok(self.database.settings.get_admin_id().await?.is_some())
    }
}
