//! Chat connector boundary
//!
//! Everything the bot sends goes through [`ChatConnector`], so the moderation
//! logic can run against Telegram or against an in-memory recorder.

use async_trait::async_trait;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, Recipient};
use crate::utils::errors::Result;

/// Kind of a chat as far as publishing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Metadata of a looked-up chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub id: ChatId,
    pub title: Option<String>,
    pub kind: ChatKind,
}

impl ChatSummary {
    /// Whether approved content can be published here
    pub fn accepts_publications(&self) -> bool {
        !matches!(self.kind, ChatKind::Private)
    }
}

/// Outbound operations on the chat platform
///
/// Text and captions are HTML formatted; callers escape user-supplied parts.
#[async_trait]
pub trait ChatConnector: Send + Sync {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId>;

    /// Copy a message without the author attribution
    ///
    /// `caption` replaces the original caption of media messages.
    async fn copy_message(
        &self,
        to: Recipient,
        from: ChatId,
        message: MessageId,
        caption: Option<String>,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId>;

    /// Forward a message keeping the author attribution
    async fn forward_message(&self, to: Recipient, from: ChatId, message: MessageId) -> Result<MessageId>;

    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    async fn edit_caption(&self, chat: ChatId, message: MessageId, caption: &str) -> Result<()>;

    async fn lookup_chat(&self, chat: Recipient) -> Result<ChatSummary>;

    /// Whether the bot itself is an administrator of `chat`
    async fn bot_is_admin(&self, chat: ChatId) -> Result<bool>;
}
