//! Settings model
//!
//! Key/value settings and the destination channel reference.

use std::fmt;
use std::str::FromStr;
use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;
use serde::{Deserialize, Serialize};
use teloxide::types::{ChatId, Recipient};

/// Well-known setting keys
pub mod keys {
    pub const ADMIN_ID: &str = "admin_id";
    pub const ADMIN_CODE: &str = "admin_code";
    pub const CHANNEL_ID: &str = "channel_id";
}

/// Destination for approved submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelRef {
    Id(i64),
    /// Public handle, stored with the leading `@`
    Username(String),
}

impl ChannelRef {
    pub fn to_recipient(&self) -> Recipient {
        match self {
            ChannelRef::Id(id) => Recipient::Id(ChatId(*id)),
            ChannelRef::Username(name) => Recipient::ChannelUsername(name.clone()),
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "{}", id),
            ChannelRef::Username(name) => f.write_str(name),
        }
    }
}

impl FromStr for ChannelRef {
    type Err = ChannelInputError;

    /// Parse a stored setting value
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ChannelInputError::Empty);
        }
        match value.parse::<i64>() {
            Ok(id) => Ok(ChannelRef::Id(id)),
            Err(_) => parse_username(value),
        }
    }
}

/// Why a channel reference typed by the admin was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelInputError {
    #[error("empty input")]
    Empty,
    #[error("invalid numeric chat id")]
    InvalidId,
    #[error("invalid channel username")]
    InvalidUsername,
    #[error("private invite links cannot be resolved")]
    PrivateInvite,
    #[error("unrecognized channel reference format")]
    UnrecognizedFormat,
}

/// Public Telegram username with the leading `@`
static USERNAME_RE: Lazy<Regex> = lazy_regex!(r"^@[A-Za-z][A-Za-z0-9_]{3,31}$");

/// `t.me` / `telegram.me` link; the first path segment is captured
static LINK_RE: Lazy<Regex> =
    lazy_regex!(r"^(?:https?://)?(?:www\.)?(?:t|telegram)\.me/([^/?#\s]+)(?:[/?#].*)?$");

fn parse_username(candidate: &str) -> Result<ChannelRef, ChannelInputError> {
    let handle = if candidate.starts_with('@') {
        candidate.to_string()
    } else {
        format!("@{}", candidate)
    };

    if USERNAME_RE.is_match(&handle) {
        Ok(ChannelRef::Username(handle))
    } else {
        Err(ChannelInputError::InvalidUsername)
    }
}

/// Parse a channel reference sent by the admin: numeric id, `@username` or a `t.me` link
pub fn parse_channel_input(input: &str) -> Result<ChannelRef, ChannelInputError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ChannelInputError::Empty);
    }

    if text.starts_with('-') || text.chars().all(|c| c.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .map(ChannelRef::Id)
            .map_err(|_| ChannelInputError::InvalidId);
    }

    if text.starts_with('@') {
        return parse_username(text);
    }

    if let Some(captures) = LINK_RE.captures(text) {
        let path = &captures[1];
        if path.starts_with('+') || path.eq_ignore_ascii_case("joinchat") {
            return Err(ChannelInputError::PrivateInvite);
        }
        return parse_username(path);
    }

    Err(ChannelInputError::UnrecognizedFormat)
}
