//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for text and media messages
//!
//! Handlers translate teloxide updates into service calls; the services do
//! all the talking back to the user.

pub mod commands;
pub mod callbacks;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use callbacks::handle_callback_query;
pub use messages::handle_message;

use teloxide::{Bot, types::{ChatId, Message}, prelude::*};
use tracing::warn;
use crate::models::user::CreateUserRequest;
use crate::utils::errors::{NewsRelayError, Result};
use crate::views::texts;

/// Profile of the user who sent a message
pub(crate) fn sender(msg: &Message) -> Result<CreateUserRequest> {
    msg.from
        .as_ref()
        .map(CreateUserRequest::from)
        .ok_or_else(|| NewsRelayError::InvalidInput("No user in message".to_string()))
}

/// Turn a permission failure into a reply; other errors propagate
pub(crate) async fn reply_on_denied(bot: &Bot, chat: ChatId, result: Result<()>) -> Result<()> {
    match result {
        Err(NewsRelayError::PermissionDenied(reason)) => {
            warn!(chat_id = chat.0, reason = %reason, "Permission denied");
            bot.send_message(chat, texts::not_admin()).await?;
            Ok(())
        }
        other => other,
    }
}
