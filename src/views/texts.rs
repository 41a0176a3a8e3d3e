//! Message texts
//!
//! All texts are HTML; every user-supplied value is escaped here.

use crate::models::setting::ChannelInputError;
use crate::models::submission::{BotStats, PendingSubmission, PublishMode, Submission, UserStats};
use crate::utils::helpers::{approval_rate, escape_html, format_timestamp, truncate_text};

const PREVIEW_CHARS: usize = 60;

/// Entries listed by `my_pending`; keeps the message under Telegram's 4096 character limit
const PENDING_LIST_LIMIT: usize = 10;

pub fn setup_prompt() -> String {
    "👋 Welcome!\n\nNo administrator is configured yet.\nEnter the admin code printed in the bot console:".to_string()
}

pub fn admin_code_invalid() -> String {
    "❌ Wrong code. Try again:".to_string()
}

pub fn admin_claimed() -> String {
    "✅ You are now the administrator!\n\n\
     Connect the destination channel next: add the bot to it as an administrator \
     and use /setup_channel."
        .to_string()
}

pub fn admin_already_claimed() -> String {
    "ℹ️ An administrator has already been configured.".to_string()
}

pub fn banned() -> String {
    "❌ You are banned and cannot use this bot.".to_string()
}

pub fn not_admin() -> String {
    "❌ Only the administrator can do this.".to_string()
}

pub fn cancelled() -> String {
    "❌ Action cancelled.".to_string()
}

fn stats_lines(stats: &UserStats) -> String {
    format!(
        "• Total submissions: {}\n• ✅ Approved: {}\n• ❌ Rejected: {}\n• ⏳ Pending: {}\n",
        stats.total, stats.approved, stats.rejected, stats.pending
    )
}

/// Greeting shown by `/start`
pub fn welcome(first_name: &str, is_admin: bool, channel_configured: bool, stats: &UserStats) -> String {
    format!(
        "👋 Welcome, {}!\n\n{}",
        escape_html(first_name),
        main_menu(is_admin, channel_configured, stats)
    )
}

pub fn main_menu(is_admin: bool, channel_configured: bool, stats: &UserStats) -> String {
    let mut text = String::new();
    if is_admin {
        text.push_str("⚙️ <b>Main menu</b>\n\n✅ You are the bot administrator.\n");
        if channel_configured {
            text.push_str("📢 Channel connected.\n");
        } else {
            text.push_str("⚠️ Channel not connected yet.\n");
        }
    } else {
        text.push_str("📊 <b>Your statistics</b>\n\n");
        text.push_str(&stats_lines(stats));
    }
    text.push_str("\nChoose an action:");
    text
}

pub fn user_stats(stats: &UserStats) -> String {
    let mut text = format!("📊 <b>Your statistics</b>\n\n{}", stats_lines(stats));
    if let Some(rate) = approval_rate(stats.approved, stats.total) {
        text.push_str(&format!("\n📈 Approval rate: {:.1}%", rate));
    }
    text
}

pub fn bot_stats(stats: &BotStats) -> String {
    let mut text = format!(
        "📊 <b>Bot statistics</b>\n\n👥 Users: {}\n🚫 Banned: {}\n\n{}",
        stats.users,
        stats.banned_users,
        stats_lines(&stats.submissions)
    );
    if let Some(rate) = approval_rate(stats.submissions.approved, stats.submissions.total) {
        text.push_str(&format!("\n📈 Approval rate: {:.1}%", rate));
    }
    text
}

pub fn admin_panel(pending_count: i64) -> String {
    format!("⚙️ <b>Admin panel</b>\n\n📬 Pending submissions: {}", pending_count)
}

pub fn channel_prompt() -> String {
    "🔗 Send one of:\n\
     1. A public channel link (https://t.me/...)\n\
     2. The channel username (@channel)\n\
     3. The channel id (e.g. -1001234567890)\n\n\
     ⚠️ Make sure the bot is an administrator of the channel with the right to post!"
        .to_string()
}

pub fn channel_input_error(error: &ChannelInputError) -> String {
    match error {
        ChannelInputError::PrivateInvite => {
            "❌ Private invite links cannot be resolved. Send the channel id or its @username instead."
                .to_string()
        }
        ChannelInputError::InvalidId => "❌ Invalid channel id.".to_string(),
        _ => "❌ Invalid format. Send a valid link, username or channel id.".to_string(),
    }
}

pub fn channel_not_publishable() -> String {
    "❌ This is not a channel or group. Send a channel link.".to_string()
}

pub fn bot_not_channel_admin() -> String {
    "❌ The bot is not an administrator of this channel.\n\
     Add the bot as an administrator with the right to post messages!"
        .to_string()
}

pub fn channel_lookup_failed(error: &str) -> String {
    format!(
        "❌ Could not access the channel.\nMake sure the bot was added and is an administrator with the right to post.\n\nError: {}",
        escape_html(error)
    )
}

pub fn channel_connected(title: Option<&str>, id: i64) -> String {
    format!(
        "✅ Channel connected!\n\n📢 Title: {}\n🆔 ID: <code>{}</code>\n\nUsers can now send submissions.",
        escape_html(title.unwrap_or("untitled")),
        id
    )
}

pub fn submission_prompt() -> String {
    "📝 <b>New submission</b>\n\n\
     Send your message:\n• Text\n• Photo with caption\n• Video with caption\n• Document\n• Animation\n\n\
     Afterwards you can choose whether it may be published under your name."
        .to_string()
}

pub fn channel_not_configured() -> String {
    "❌ The channel is not connected yet. Please contact the administrator.".to_string()
}

pub fn unsupported_content() -> String {
    "❌ This kind of message is not supported. Send text, a photo, a video, a document or an animation.".to_string()
}

pub fn content_received() -> String {
    "✅ Message received!\n\nChoose how it may be published:".to_string()
}

pub fn submission_sent(submission_id: i64) -> String {
    format!(
        "✅ Submission #{} was sent for moderation!\n\nYou will be notified once the administrator decides.",
        submission_id
    )
}

/// Header of a submission delivered to the admin
pub fn review_header(submission_id: i64, author: &str, allow_forward: bool) -> String {
    let consent = if allow_forward {
        "✅ Attribution allowed"
    } else {
        "🔒 Anonymous only"
    };
    format!(
        "📬 <b>New submission #{}</b>\n\n👤 From: {}\n🔐 {}",
        submission_id,
        escape_html(author),
        consent
    )
}

/// Caption for a media submission delivered to the admin
pub fn review_caption(header: &str, caption: &str) -> String {
    if caption.is_empty() {
        header.to_string()
    } else {
        format!("{}\n\n{}", header, escape_html(caption))
    }
}

pub fn my_pending(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "📭 You have no pending submissions.".to_string();
    }

    let mut text = format!("⏳ <b>Your pending submissions</b> ({})\n", submissions.len());
    for submission in submissions.iter().take(PENDING_LIST_LIMIT) {
        text.push_str(&format!(
            "\n#{} · {} · {}",
            submission.id,
            submission.content_type,
            format_timestamp(submission.created_at)
        ));
        if !submission.content.is_empty() {
            text.push_str(&format!("\n   {}", escape_html(&truncate_text(&submission.content, PREVIEW_CHARS))));
        }
    }
    if submissions.len() > PENDING_LIST_LIMIT {
        text.push_str(&format!("\n\n…and {} more", submissions.len() - PENDING_LIST_LIMIT));
    }
    text
}

pub fn review_queue(pending: &[PendingSubmission], total: i64) -> String {
    if pending.is_empty() {
        return "📭 No pending submissions.".to_string();
    }

    let mut text = format!("📬 <b>Pending submissions</b>: {}\n", total);
    for item in pending {
        text.push_str(&format!(
            "\n#{} · {} · {}",
            item.submission.id,
            escape_html(&item.author_name()),
            item.submission.content_type
        ));
    }
    if total > pending.len() as i64 {
        text.push_str(&format!("\n\nShowing the oldest {}; decide on them to see more.", pending.len()));
    }
    text
}

pub fn approval_notice(submission_id: i64, mode: PublishMode) -> String {
    format!("✅ Your submission #{} was approved and {}!", submission_id, mode.decision_text())
}

pub fn rejection_notice(submission_id: i64) -> String {
    format!("❌ Your submission #{} was rejected.", submission_id)
}

/// Outcome appended to the admin's review message
pub fn approved_footer(mode: PublishMode) -> String {
    format!("✅ <b>APPROVED</b> ({})", mode.decision_text())
}

pub fn rejected_footer() -> String {
    "❌ <b>REJECTED</b>".to_string()
}

pub fn with_footer(body: &str, footer: &str) -> String {
    if body.is_empty() {
        footer.to_string()
    } else {
        format!("{}\n\n{}", escape_html(body), footer)
    }
}

pub fn ban_usage(command: &str) -> String {
    format!("Usage: /{} &lt;user_id&gt;", command)
}

pub fn ban_result(user_id: i64, banned: bool, found: bool) -> String {
    match (found, banned) {
        (false, _) => format!("❌ User {} is unknown.", user_id),
        (true, true) => format!("🚫 User {} is banned.", user_id),
        (true, false) => format!("✅ User {} is unbanned.", user_id),
    }
}

pub fn cannot_ban_self() -> String {
    "❌ You cannot ban yourself.".to_string()
}

pub fn help(is_admin: bool) -> String {
    let mut text = "ℹ️ <b>Commands</b>\n\n\
         /start - main menu\n\
         /submit - send news for moderation\n\
         /stats - your statistics\n\
         /pending - your pending submissions\n\
         /cancel - cancel the current action\n\
         /help - this help"
        .to_string();
    if is_admin {
        text.push_str(
            "\n\n<b>Administrator</b>\n\
             /admin - admin panel\n\
             /setup_channel - connect the destination channel\n\
             /ban &lt;user_id&gt; - ban a user\n\
             /unban &lt;user_id&gt; - unban a user",
        );
    }
    text
}
