//! Settings repository implementation
//!
//! Key/value settings holding the admin identity, the one-time setup code
//! and the destination channel.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use crate::models::setting::{keys, ChannelRef};
use crate::utils::errors::NewsRelayError;
use crate::utils::helpers::generate_admin_code;

#[derive(Clone, Debug)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Upsert a setting
    pub async fn set(&self, key: &str, value: &str) -> Result<(), NewsRelayError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        debug!(key = key, "Setting stored");
        Ok(())
    }

    /// Get a setting; a missing key and a cleared value both read as absent
    pub async fn get(&self, key: &str) -> Result<Option<String>, NewsRelayError> {
        let row: Option<(Option<String>,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|(value,)| value).filter(|value| !value.is_empty()))
    }

    /// Get the configured admin user id
    pub async fn get_admin_id(&self) -> Result<Option<i64>, NewsRelayError> {
        let Some(raw) = self.get(keys::ADMIN_ID).await? else {
            return Ok(None);
        };

        match raw.parse::<i64>() {
            Ok(admin_id) => Ok(Some(admin_id)),
            Err(_) => {
                warn!(value = %raw, "Stored admin id is not an integer, ignoring it");
                Ok(None)
            }
        }
    }

    /// Make `user_id` the admin and clear the setup code in one transaction
    pub async fn set_admin(&self, user_id: i64) -> Result<(), NewsRelayError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#
        )
        .bind(keys::ADMIN_ID)
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE settings SET value = NULL WHERE key = ?")
            .bind(keys::ADMIN_CODE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(admin_id = user_id, "Administrator assigned");
        Ok(())
    }

    /// Claim the admin role with the setup code
    ///
    /// Compare-and-swap: succeeds only while no admin is set and `code` equals the
    /// stored non-empty setup code. The first valid claim wins.
    pub async fn claim_admin(&self, user_id: i64, code: &str) -> Result<bool, NewsRelayError> {
        if code.is_empty() {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            SELECT ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM settings WHERE key = ? AND value IS NOT NULL AND value <> ''
            )
            AND EXISTS (
                SELECT 1 FROM settings WHERE key = ? AND value = ?
            )
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#
        )
        .bind(keys::ADMIN_ID)
        .bind(user_id.to_string())
        .bind(keys::ADMIN_ID)
        .bind(keys::ADMIN_CODE)
        .bind(code)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            debug!(user_id = user_id, "Admin claim rejected");
            return Ok(false);
        }

        sqlx::query("UPDATE settings SET value = NULL WHERE key = ?")
            .bind(keys::ADMIN_CODE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(admin_id = user_id, "Administrator claimed the setup code");
        Ok(true)
    }

    /// Current setup code, if one is waiting to be claimed
    pub async fn get_admin_code(&self) -> Result<Option<String>, NewsRelayError> {
        self.get(keys::ADMIN_CODE).await
    }

    /// Generate, persist and return a fresh setup code
    pub async fn generate_admin_code(&self) -> Result<String, NewsRelayError> {
        let code = generate_admin_code();
        self.set(keys::ADMIN_CODE, &code).await?;
        Ok(code)
    }

    /// Setup code for the current "no admin" period
    ///
    /// `None` once an admin exists. Reuses a stored code instead of regenerating it.
    pub async fn ensure_admin_code(&self) -> Result<Option<String>, NewsRelayError> {
        if self.get_admin_id().await?.is_some() {
            return Ok(None);
        }

        match self.get_admin_code().await? {
            Some(code) => Ok(Some(code)),
            None => self.generate_admin_code().await.map(Some),
        }
    }

    /// Get the destination channel
    pub async fn get_channel_id(&self) -> Result<Option<ChannelRef>, NewsRelayError> {
        let Some(raw) = self.get(keys::CHANNEL_ID).await? else {
            return Ok(None);
        };

        match raw.parse::<ChannelRef>() {
            Ok(channel) => Ok(Some(channel)),
            Err(e) => {
                warn!(value = %raw, error = %e, "Stored channel reference is invalid, ignoring it");
                Ok(None)
            }
        }
    }

    /// Set the destination channel
    pub async fn set_channel_id(&self, channel: &ChannelRef) -> Result<(), NewsRelayError> {
        self.set(keys::CHANNEL_ID, &channel.to_string()).await
    }
}
