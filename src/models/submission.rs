//! Submission model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use teloxide::types::{ChatId, MessageId};

/// Kind of content a user submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Photo,
    Video,
    Document,
    Animation,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Photo => "photo",
            ContentType::Video => "video",
            ContentType::Document => "document",
            ContentType::Animation => "animation",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation lifecycle of a submission
///
/// The only legal transitions are `Pending -> Approved` and `Pending -> Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an approved submission reaches the destination channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishMode {
    /// Forward, keeping the author attribution
    WithAuthor,
    /// Copy, stripping the author attribution
    Anonymous,
}

impl PublishMode {
    /// Mode actually used for a submission; attribution needs the author's consent
    pub fn effective(self, allow_forward: bool) -> Self {
        match self {
            PublishMode::WithAuthor if allow_forward => PublishMode::WithAuthor,
            _ => PublishMode::Anonymous,
        }
    }

    /// Decision description stored on the submission
    pub fn decision_text(&self) -> &'static str {
        match self {
            PublishMode::WithAuthor => "published with author attribution",
            PublishMode::Anonymous => "published anonymously",
        }
    }
}

/// Decision note stored on rejected submissions
pub const REJECTION_NOTE: &str = "Rejected by administrator";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub message_id: i64,
    pub content_type: ContentType,
    pub content: String,
    pub allow_forward: bool,
    pub status: SubmissionStatus,
    pub admin_decision: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Private chat the submission was sent from
    pub fn source_chat(&self) -> ChatId {
        ChatId(self.user_id)
    }

    pub fn source_message(&self) -> MessageId {
        MessageId(self.message_id as i32)
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}

/// Pending submission joined with its author's profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingSubmission {
    #[sqlx(flatten)]
    pub submission: Submission,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl PendingSubmission {
    pub fn author_name(&self) -> String {
        super::user::display_name(
            self.submission.user_id,
            self.first_name.as_deref(),
            self.username.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub user_id: i64,
    pub message_id: i64,
    pub content_type: ContentType,
    pub content: String,
    pub allow_forward: bool,
}

/// Per-user submission counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserStats {
    pub total: i64,
    pub approved: i64,
    pub rejected: i64,
    pub pending: i64,
}

/// Bot-wide counters shown on the admin panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub users: i64,
    pub banned_users: i64,
    pub submissions: UserStats,
}
