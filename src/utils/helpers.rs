//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Length of the one-time admin setup code
pub const ADMIN_CODE_LENGTH: usize = 6;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape text for Telegram HTML parse mode
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Generate an uppercase alphanumeric admin setup code
pub fn generate_admin_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    (0..ADMIN_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Normalize user input of a setup code for comparison
pub fn normalize_admin_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Approval percentage, `None` when nothing was submitted
pub fn approval_rate(approved: i64, total: i64) -> Option<f64> {
    if total > 0 {
        Some(approved as f64 / total as f64 * 100.0)
    } else {
        None
    }
}
