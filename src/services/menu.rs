//! Menu service
//!
//! Menus, statistics, the caller's pending list, cancel and ban management.

use std::sync::Arc;
use teloxide::types::ChatId;
use crate::database::DatabaseService;
use crate::state::StateStorage;
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_user_action};
use crate::views::{keyboards, texts, Screen};
use super::auth::AuthService;
use super::connector::ChatConnector;

#[derive(Clone)]
pub struct MenuService {
    database: DatabaseService,
    auth: AuthService,
    states: Arc<StateStorage>,
    connector: Arc<dyn ChatConnector>,
}

impl MenuService {
    pub fn new(
        database: DatabaseService,
        auth: AuthService,
        states: Arc<StateStorage>,
        connector: Arc<dyn ChatConnector>,
    ) -> Self {
        Self {
            database,
            auth,
            states,
            connector,
        }
    }

    async fn menu_text(&self, user_id: i64, greeting: Option<&str>) -> Result<(String, bool)> {
        let is_admin = self.auth.is_admin(user_id).await?;
        let channel_configured = self.database.settings.get_channel_id().await?.is_some();
        let stats = self.database.submissions.user_stats(user_id).await?;

        let text = match greeting {
            Some(name) => texts::welcome(name, is_admin, channel_configured, &stats),
            None => texts::main_menu(is_admin, channel_configured, &stats),
        };
        Ok((text, is_admin))
    }

    /// Greeting with the main menu
    pub async fn welcome(&self, user_id: i64, first_name: &str, screen: Screen) -> Result<()> {
        let (text, is_admin) = self.menu_text(user_id, Some(first_name)).await?;
        screen
            .show(self.connector.as_ref(), &text, Some(keyboards::main_menu(is_admin)))
            .await
    }

    /// Main menu; leaves any conversation the user was in
    pub async fn main_menu(&self, user_id: i64, screen: Screen) -> Result<()> {
        self.states.clear(user_id);
        let (text, is_admin) = self.menu_text(user_id, None).await?;
        screen
            .show(self.connector.as_ref(), &text, Some(keyboards::main_menu(is_admin)))
            .await
    }

    pub async fn user_stats(&self, user_id: i64, screen: Screen) -> Result<()> {
        let stats = self.database.submissions.user_stats(user_id).await?;
        screen
            .show(self.connector.as_ref(), &texts::user_stats(&stats), Some(keyboards::back_to_main()))
            .await
    }

    /// The caller's pending submissions; aborts an in-progress capture
    pub async fn my_pending(&self, user_id: i64, screen: Screen) -> Result<()> {
        if self.states.clear(user_id) {
            log_user_action(user_id, "capture_interrupted", None);
        }

        let pending = self.database.submissions.list_user_pending(user_id).await?;
        screen
            .show(self.connector.as_ref(), &texts::my_pending(&pending), Some(keyboards::back_to_main()))
            .await
    }

    pub async fn cancel(&self, user_id: i64, screen: Screen) -> Result<()> {
        if self.states.clear(user_id) {
            log_user_action(user_id, "cancelled", None);
        }

        let is_admin = self.auth.is_admin(user_id).await?;
        screen
            .show(self.connector.as_ref(), &texts::cancelled(), Some(keyboards::main_menu(is_admin)))
            .await
    }

    pub async fn help(&self, user_id: i64, screen: Screen) -> Result<()> {
        let is_admin = self.auth.is_admin(user_id).await?;
        screen.show(self.connector.as_ref(), &texts::help(is_admin), None).await
    }

    pub async fn admin_panel(&self, actor: i64, screen: Screen) -> Result<()> {
        self.auth.require_admin(actor, "open the admin panel").await?;

        let pending = self.database.submissions.count_pending().await?;
        screen
            .show(
                self.connector.as_ref(),
                &texts::admin_panel(pending),
                Some(keyboards::admin_panel(pending)),
            )
            .await
    }

    pub async fn bot_stats(&self, actor: i64, screen: Screen) -> Result<()> {
        self.auth.require_admin(actor, "view bot statistics").await?;

        let stats = self.database.bot_stats().await?;
        screen
            .show(
                self.connector.as_ref(),
                &texts::bot_stats(&stats),
                Some(keyboards::back_to_admin_panel()),
            )
            .await
    }

    /// Ban or unban the user whose id is given in `argument`
    pub async fn set_ban(&self, actor: i64, argument: &str, banned: bool) -> Result<()> {
        self.auth.require_admin(actor, if banned { "ban users" } else { "unban users" }).await?;

        let chat = ChatId(actor);
        let command = if banned { "ban" } else { "unban" };

        let Ok(user_id) = argument.trim().parse::<i64>() else {
            self.connector.send_text(chat, &texts::ban_usage(command), None).await?;
            return Ok(());
        };

        if banned && user_id == actor {
            self.connector.send_text(chat, &texts::cannot_ban_self(), None).await?;
            return Ok(());
        }

        let found = self.database.users.set_ban_status(user_id, banned).await?;
        if found {
            if banned {
                self.states.clear(user_id);
            }
            log_admin_action(actor, command, Some(&user_id.to_string()), None);
        }

        self.connector
            .send_text(chat, &texts::ban_result(user_id, banned, found), None)
            .await?;
        Ok(())
    }
}
