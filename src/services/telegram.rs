//! Telegram implementation of the chat connector

use async_trait::async_trait;
use teloxide::payloads::{
    CopyMessageSetters, EditMessageCaptionSetters, EditMessageTextSetters, SendMessageSetters,
};
use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, ChatMemberKind, InlineKeyboardMarkup, MessageId, ParseMode, Recipient};
use teloxide::Bot;
use tracing::debug;
use crate::utils::errors::Result;
use super::connector::{ChatConnector, ChatKind, ChatSummary};

/// Chat connector backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramConnector {
    bot: Bot,
}

impl TelegramConnector {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatConnector for TelegramConnector {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId> {
        let mut request = self.bot.send_message(chat, text).parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        let message = request.send().await?;
        Ok(message.id)
    }

    async fn copy_message(
        &self,
        to: Recipient,
        from: ChatId,
        message: MessageId,
        caption: Option<String>,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId> {
        let mut request = self.bot.copy_message(to, from, message);
        if let Some(caption) = caption {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        Ok(request.send().await?)
    }

    async fn forward_message(&self, to: Recipient, from: ChatId, message: MessageId) -> Result<MessageId> {
        let forwarded = self.bot.forward_message(to, from, message).send().await?;
        Ok(forwarded.id)
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let mut request = self
            .bot
            .edit_message_text(chat, message, text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        request.send().await?;
        Ok(())
    }

    async fn edit_caption(&self, chat: ChatId, message: MessageId, caption: &str) -> Result<()> {
        self.bot
            .edit_message_caption(chat, message)
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .send()
            .await?;
        Ok(())
    }

    async fn lookup_chat(&self, chat: Recipient) -> Result<ChatSummary> {
        let info = self.bot.get_chat(chat).send().await?;

        let kind = if info.is_channel() {
            ChatKind::Channel
        } else if info.is_supergroup() {
            ChatKind::Supergroup
        } else if info.is_group() {
            ChatKind::Group
        } else {
            ChatKind::Private
        };

        debug!(chat_id = info.id.0, kind = ?kind, "Chat looked up");
        Ok(ChatSummary {
            id: info.id,
            title: info.title().map(str::to_string),
            kind,
        })
    }

    async fn bot_is_admin(&self, chat: ChatId) -> Result<bool> {
        let me = self.bot.get_me().send().await?;
        let member = self.bot.get_chat_member(chat, me.id).send().await?;

        Ok(matches!(
            member.kind,
            ChatMemberKind::Owner(_) | ChatMemberKind::Administrator(_)
        ))
    }
}
