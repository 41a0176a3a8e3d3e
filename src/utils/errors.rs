//! Error handling for NewsRelay
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for NewsRelay application
#[derive(Error, Debug)]
pub enum NewsRelayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for NewsRelay operations
pub type Result<T> = std::result::Result<T, NewsRelayError>;

impl NewsRelayError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            NewsRelayError::Database(_) => false,
            NewsRelayError::Migration(_) => false,
            NewsRelayError::Telegram(_) => true,
            NewsRelayError::Config(_) => false,
            NewsRelayError::ConfigLoad(_) => false,
            NewsRelayError::PermissionDenied(_) => false,
            NewsRelayError::InvalidStateTransition { .. } => false,
            NewsRelayError::Io(_) => true,
            NewsRelayError::InvalidInput(_) => false,
            NewsRelayError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NewsRelayError::Database(_) => ErrorSeverity::Critical,
            NewsRelayError::Migration(_) => ErrorSeverity::Critical,
            NewsRelayError::Config(_) => ErrorSeverity::Critical,
            NewsRelayError::ConfigLoad(_) => ErrorSeverity::Critical,
            NewsRelayError::PermissionDenied(_) => ErrorSeverity::Warning,
            NewsRelayError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
