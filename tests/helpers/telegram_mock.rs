//! Recording chat connector for testing
//!
//! Stands in for the Telegram Bot API: every outbound operation is recorded
//! and can be made to fail, chat lookups are answered from a configurable
//! table.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, Recipient};
use NewsRelay::services::{ChatConnector, ChatKind, ChatSummary};
use NewsRelay::utils::errors::{NewsRelayError, Result};

/// Outbound operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SendText,
    Copy,
    Forward,
    EditText,
    EditCaption,
    LookupChat,
    BotIsAdmin,
}

/// A recorded outbound operation
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Copy {
        to: Recipient,
        from: ChatId,
        message: MessageId,
        caption: Option<String>,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Forward {
        to: Recipient,
        from: ChatId,
        message: MessageId,
    },
    EditText {
        chat: ChatId,
        message: MessageId,
        text: String,
    },
    EditCaption {
        chat: ChatId,
        message: MessageId,
        caption: String,
    },
}

impl Sent {
    /// Chat the operation delivered to
    pub fn destination(&self) -> Recipient {
        match self {
            Sent::Text { chat, .. } | Sent::EditText { chat, .. } | Sent::EditCaption { chat, .. } => {
                Recipient::Id(*chat)
            }
            Sent::Copy { to, .. } | Sent::Forward { to, .. } => to.clone(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } | Sent::EditText { text, .. } => Some(text),
            Sent::EditCaption { caption, .. } => Some(caption),
            Sent::Copy { caption, .. } => caption.as_deref(),
            Sent::Forward { .. } => None,
        }
    }
}

fn recipient_key(recipient: &Recipient) -> String {
    match recipient {
        Recipient::Id(id) => id.0.to_string(),
        Recipient::ChannelUsername(name) => name.clone(),
    }
}

/// In-memory chat connector
#[derive(Default)]
pub struct RecordingConnector {
    sent: Mutex<Vec<Sent>>,
    failing_operations: Mutex<HashSet<Operation>>,
    failing_chats: Mutex<HashSet<String>>,
    chats: Mutex<HashMap<String, ChatSummary>>,
    admin_in: Mutex<HashSet<i64>>,
    next_message_id: AtomicI32,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(5000),
            ..Self::default()
        }
    }

    /// Every call of `operation` fails from now on
    pub fn fail(&self, operation: Operation) {
        self.failing_operations.lock().unwrap().insert(operation);
    }

    /// Every delivery to `chat` fails from now on
    pub fn fail_chat(&self, chat: ChatId) {
        self.failing_chats.lock().unwrap().insert(chat.0.to_string());
    }

    pub fn recover(&self) {
        self.failing_operations.lock().unwrap().clear();
        self.failing_chats.lock().unwrap().clear();
    }

    /// Make `reference` (numeric id or `@username`) resolve to `summary`
    pub fn add_chat(&self, reference: &str, summary: ChatSummary) {
        self.chats.lock().unwrap().insert(reference.to_string(), summary);
    }

    /// Register a channel the bot administrates, reachable by id and username
    pub fn add_channel(&self, id: i64, username: Option<&str>, title: &str) {
        let summary = ChatSummary {
            id: ChatId(id),
            title: Some(title.to_string()),
            kind: ChatKind::Channel,
        };
        self.add_chat(&id.to_string(), summary.clone());
        if let Some(username) = username {
            self.add_chat(username, summary);
        }
        self.admin_in.lock().unwrap().insert(id);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Everything delivered to `chat`
    pub fn sent_to(&self, chat: ChatId) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|sent| sent.destination() == Recipient::Id(chat))
            .collect()
    }

    /// Texts sent (or edited) in `chat`
    pub fn texts_to(&self, chat: ChatId) -> Vec<String> {
        self.sent_to(chat)
            .iter()
            .filter_map(|sent| sent.text().map(str::to_string))
            .collect()
    }

    pub fn last_text_to(&self, chat: ChatId) -> Option<String> {
        self.texts_to(chat).pop()
    }

    fn check(&self, operation: Operation, destination: &str) -> Result<()> {
        if self.failing_operations.lock().unwrap().contains(&operation)
            || self.failing_chats.lock().unwrap().contains(destination)
        {
            return Err(NewsRelayError::ServiceUnavailable(format!(
                "{:?} to {} failed",
                operation, destination
            )));
        }
        Ok(())
    }

    fn record(&self, sent: Sent) -> MessageId {
        self.sent.lock().unwrap().push(sent);
        MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ChatConnector for RecordingConnector {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId> {
        self.check(Operation::SendText, &chat.0.to_string())?;
        Ok(self.record(Sent::Text {
            chat,
            text: text.to_string(),
            keyboard,
        }))
    }

    async fn copy_message(
        &self,
        to: Recipient,
        from: ChatId,
        message: MessageId,
        caption: Option<String>,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId> {
        self.check(Operation::Copy, &recipient_key(&to))?;
        Ok(self.record(Sent::Copy {
            to,
            from,
            message,
            caption,
            keyboard,
        }))
    }

    async fn forward_message(&self, to: Recipient, from: ChatId, message: MessageId) -> Result<MessageId> {
        self.check(Operation::Forward, &recipient_key(&to))?;
        Ok(self.record(Sent::Forward { to, from, message }))
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        _keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        self.check(Operation::EditText, &chat.0.to_string())?;
        self.record(Sent::EditText {
            chat,
            message,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_caption(&self, chat: ChatId, message: MessageId, caption: &str) -> Result<()> {
        self.check(Operation::EditCaption, &chat.0.to_string())?;
        self.record(Sent::EditCaption {
            chat,
            message,
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn lookup_chat(&self, chat: Recipient) -> Result<ChatSummary> {
        let key = recipient_key(&chat);
        self.check(Operation::LookupChat, &key)?;
        self.chats
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| NewsRelayError::ServiceUnavailable(format!("chat not found: {}", key)))
    }

    async fn bot_is_admin(&self, chat: ChatId) -> Result<bool> {
        self.check(Operation::BotIsAdmin, &chat.0.to_string())?;
        Ok(self.admin_in.lock().unwrap().contains(&chat.0))
    }
}
