//! Inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use crate::models::submission::PublishMode;
use super::actions::CallbackAction;

fn button(label: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.to_data())
}

pub fn main_menu(is_admin: bool) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![button("📝 Submit news", CallbackAction::Submit)],
        vec![button("📊 My statistics", CallbackAction::MyStats)],
        vec![button("⏳ My pending", CallbackAction::MyPending)],
    ];
    if is_admin {
        rows.push(vec![button("⚙️ Admin panel", CallbackAction::AdminPanel)]);
    }
    InlineKeyboardMarkup::new(rows)
}

pub fn admin_panel(pending_count: i64) -> InlineKeyboardMarkup {
    let pending_label = if pending_count > 0 {
        format!("📬 Pending ({})", pending_count)
    } else {
        "📭 Nothing pending".to_string()
    };

    InlineKeyboardMarkup::new(vec![
        vec![button(pending_label, CallbackAction::ReviewQueue)],
        vec![button("🔗 Change channel", CallbackAction::ChangeChannel)],
        vec![button("📊 Bot statistics", CallbackAction::BotStats)],
        vec![button("◀️ Back", CallbackAction::BackToMain)],
    ])
}

pub fn forward_choice() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("✅ Publish under my name", CallbackAction::Forward(true))],
        vec![button("🔒 Publish anonymously", CallbackAction::Forward(false))],
        vec![button("❌ Cancel", CallbackAction::Cancel)],
    ])
}

/// Moderation controls; attribution is only offered when the author consented
pub fn admin_decision(submission_id: i64, allow_forward: bool) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();
    if allow_forward {
        rows.push(vec![button(
            "✅ Publish with author",
            CallbackAction::Approve { submission_id, mode: PublishMode::WithAuthor },
        )]);
    }
    rows.push(vec![button(
        "✅ Publish anonymously",
        CallbackAction::Approve { submission_id, mode: PublishMode::Anonymous },
    )]);
    rows.push(vec![button("❌ Reject", CallbackAction::Reject { submission_id })]);
    InlineKeyboardMarkup::new(rows)
}

pub fn cancel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("❌ Cancel", CallbackAction::Cancel)]])
}

pub fn back_to_main() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("◀️ Main menu", CallbackAction::BackToMain)]])
}

pub fn back_to_admin_panel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("◀️ Admin panel", CallbackAction::AdminPanel)]])
}
