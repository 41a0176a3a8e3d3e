//! Admin command handlers

use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::handlers::{reply_on_denied, sender};
use crate::views::Screen;

/// Handle /admin command - show admin panel
pub async fn handle_admin_panel(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    debug!(user_id = user.user_id, "Processing /admin command");

    let result = services
        .menu_service
        .admin_panel(user.user_id, Screen::New(msg.chat.id))
        .await;
    reply_on_denied(&bot, msg.chat.id, result).await
}

/// Handle /setup_channel command
pub async fn handle_setup_channel(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    debug!(user_id = user.user_id, "Processing /setup_channel command");

    let result = services
        .setup_service
        .begin_channel_setup(user.user_id, Screen::New(msg.chat.id))
        .await;
    reply_on_denied(&bot, msg.chat.id, result).await
}

/// Handle /ban and /unban commands
pub async fn handle_ban(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    argument: &str,
    banned: bool,
) -> Result<()> {
    let user = sender(&msg)?;
    debug!(user_id = user.user_id, banned = banned, "Processing ban command");

    let result = services.menu_service.set_ban(user.user_id, argument, banned).await;
    reply_on_denied(&bot, msg.chat.id, result).await
}
