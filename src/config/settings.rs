//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub submission: SubmissionConfig,
    pub moderation: ModerationConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily-rolling log file; stdout only when absent
    pub file_path: Option<String>,
}

/// In-flight submission state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionConfig {
    /// 0 keeps conversation state until the process exits
    pub state_ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Moderation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    pub review_batch_size: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("bot.token", defaults.bot.token)?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("submission.state_ttl_seconds", defaults.submission.state_ttl_seconds)?
            .set_default(
                "submission.cleanup_interval_seconds",
                defaults.submission.cleanup_interval_seconds,
            )?
            .set_default("moderation.review_batch_size", defaults.moderation.review_batch_size)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("NEWSRELAY").separator("__"));

        // Plain BOT_TOKEN is the conventional variable for Telegram bots
        if std::env::var("NEWSRELAY__BOT__TOKEN").is_err() {
            if let Ok(token) = std::env::var("BOT_TOKEN") {
                builder = builder.set_override("bot.token", token)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::NewsRelayError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: "sqlite://bot_database.db".to_string(),
                max_connections: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
            submission: SubmissionConfig {
                state_ttl_seconds: 3600,
                cleanup_interval_seconds: 300,
            },
            moderation: ModerationConfig {
                review_batch_size: 10,
            },
        }
    }
}
