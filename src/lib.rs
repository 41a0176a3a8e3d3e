//! NewsRelay Telegram Bot
//!
//! A moderation relay for a Telegram channel: users submit news, a single
//! administrator approves (attributed or anonymous) or rejects each
//! submission, and approved content is published to the configured channel.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod views;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{NewsRelayError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::StateStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
