//! Message handlers module
//!
//! Routes plain messages by the sender's conversation state.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::debug;
use crate::models::submission::ContentType;
use crate::services::ServiceFactory;
use crate::state::{CapturedContent, ConversationState};
use crate::utils::errors::Result;
use crate::views::{keyboards, texts, Screen};
use crate::handlers::{reply_on_denied, sender};

/// Capture a submission from a message; `None` for unsupported kinds
///
/// Text starting with `/` is an unknown command, not content.
pub fn extract_content(msg: &Message) -> Option<CapturedContent> {
    if msg.text().is_some_and(|text| text.starts_with('/')) {
        return None;
    }

    let content_type = if msg.text().is_some() {
        ContentType::Text
    } else if msg.animation().is_some() {
        ContentType::Animation
    } else if msg.photo().is_some() {
        ContentType::Photo
    } else if msg.video().is_some() {
        ContentType::Video
    } else if msg.document().is_some() {
        ContentType::Document
    } else {
        return None;
    };

    let content = msg
        .text()
        .or_else(|| msg.caption())
        .unwrap_or_default()
        .to_string();

    Some(CapturedContent {
        message_id: msg.id.0,
        content_type,
        content,
    })
}

/// Handle incoming messages
pub async fn handle_message(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let chat_id = msg.chat.id;
    if !chat_id.is_user() {
        return Ok(());
    }

    let user = sender(&msg)?;
    let user_id = user.user_id;

    match services.states.get(user_id) {
        Some(ConversationState::AwaitingAdminCode) => match msg.text() {
            Some(text) => {
                services.setup_service.submit_admin_code(user_id, text).await?;
            }
            None => {
                bot.send_message(chat_id, texts::admin_code_invalid()).await?;
            }
        },
        Some(ConversationState::AwaitingChannel) => {
            let Some(text) = msg.text() else {
                bot.send_message(chat_id, texts::channel_prompt()).await?;
                return Ok(());
            };
            let result = services.setup_service.submit_channel(user_id, text).await.map(|_| ());
            reply_on_denied(&bot, chat_id, result).await?;
        }
        Some(ConversationState::AwaitingContent) => {
            services.submission_service.capture(user_id, extract_content(&msg)).await?;
        }
        Some(ConversationState::AwaitingForwardChoice(_)) => {
            debug!(user_id = user_id, "Message while waiting for the forward choice");
            bot.send_message(chat_id, texts::content_received())
                .reply_markup(keyboards::forward_choice())
                .await?;
        }
        None => {
            debug!(user_id = user_id, "Message outside a conversation, showing the menu");
            services.menu_service.main_menu(user_id, Screen::New(chat_id)).await?;
        }
    }

    Ok(())
}
