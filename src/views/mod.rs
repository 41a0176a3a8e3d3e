//! Presentation layer
//!
//! Texts, keyboards and callback actions, plus [`Screen`] which decides
//! whether a reply replaces the message a button was pressed on or is sent
//! as a new message.

pub mod actions;
pub mod keyboards;
pub mod texts;

pub use actions::CallbackAction;

use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};
use tracing::debug;
use crate::services::ChatConnector;
use crate::utils::errors::Result;

/// Where a reply is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Replace the text of a message the bot sent earlier
    Edit(ChatId, MessageId),
    New(ChatId),
}

impl Screen {
    /// Show `text`; a failed edit falls back to a new message
    pub async fn show(
        &self,
        connector: &dyn ChatConnector,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        match *self {
            Screen::Edit(chat, message) => {
                match connector.edit_text(chat, message, text, keyboard.clone()).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        debug!(chat_id = chat.0, error = %e, "Edit failed, sending a new message");
                        connector.send_text(chat, text, keyboard).await.map(|_| ())
                    }
                }
            }
            Screen::New(chat) => connector.send_text(chat, text, keyboard).await.map(|_| ()),
        }
    }
}
