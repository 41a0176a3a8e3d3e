//! Conversation context management
//!
//! Tracks where each user currently is in a multi-step interaction. A user
//! without a context is idle.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};
use crate::models::submission::ContentType;

/// Content captured while the user is asked for forwarding consent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedContent {
    pub message_id: i32,
    pub content_type: ContentType,
    /// Text or caption; empty for media without a caption
    pub content: String,
}

/// Step of the conversation the user is in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    /// No admin configured, waiting for the setup code
    AwaitingAdminCode,
    /// Admin is changing the destination channel
    AwaitingChannel,
    /// Waiting for the content to submit
    AwaitingContent,
    /// Content captured, waiting for the yes/no attribution choice
    AwaitingForwardChoice(CapturedContent),
}

impl ConversationState {
    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::AwaitingAdminCode => "awaiting_admin_code",
            ConversationState::AwaitingChannel => "awaiting_channel",
            ConversationState::AwaitingContent => "awaiting_content",
            ConversationState::AwaitingForwardChoice(_) => "awaiting_forward_choice",
        }
    }
}

/// User conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub user_id: i64,
    pub state: ConversationState,
    /// When this context expires; `None` never expires
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    pub fn new(user_id: i64, state: ConversationState, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            state,
            expires_at: ttl.map(|ttl| now + ttl),
            updated_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |expires_at| expires_at <= now)
    }
}
