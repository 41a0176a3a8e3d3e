//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod submit;
pub mod admin;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "NewsRelay commands:")]
pub enum Command {
    #[command(description = "Show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Send news for moderation")]
    Submit,
    #[command(description = "Show your statistics")]
    Stats,
    #[command(description = "List your pending submissions")]
    Pending,
    #[command(description = "Cancel the current action")]
    Cancel,
    #[command(description = "Admin panel (admin only)")]
    Admin,
    #[command(description = "Connect the destination channel (admin only)")]
    SetupChannel,
    #[command(description = "Ban a user by id (admin only)")]
    Ban(String),
    #[command(description = "Unban a user by id (admin only)")]
    Unban(String),
}

/// Main command dispatcher
///
/// The bot only converses in private chats.
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, services: ServiceFactory) -> Result<()> {
    if !msg.chat.id.is_user() {
        debug!(chat_id = msg.chat.id.0, command = ?cmd, "Ignoring command outside a private chat");
        return Ok(());
    }

    match cmd {
        Command::Start => start::handle_start(msg, services).await,
        Command::Help => help::handle_help(msg, services).await,
        Command::Submit => submit::handle_submit(msg, services).await,
        Command::Stats => submit::handle_stats(msg, services).await,
        Command::Pending => submit::handle_pending(msg, services).await,
        Command::Cancel => submit::handle_cancel(msg, services).await,
        Command::Admin => admin::handle_admin_panel(bot, msg, services).await,
        Command::SetupChannel => admin::handle_setup_channel(bot, msg, services).await,
        Command::Ban(argument) => admin::handle_ban(bot, msg, services, &argument, true).await,
        Command::Unban(argument) => admin::handle_ban(bot, msg, services, &argument, false).await,
    }
}
