//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

use teloxide::{Bot, types::{CallbackQuery, ChatId, Message}, prelude::*};
use tracing::{debug, warn};
use crate::models::user::CreateUserRequest;
use crate::services::{ReviewMessage, ServiceFactory};
use crate::utils::errors::{NewsRelayError, Result};
use crate::views::{texts, CallbackAction, Screen};

/// Answer shown on the pressed button
struct Answer {
    text: Option<String>,
    alert: bool,
}

impl Answer {
    fn silent() -> Self {
        Self { text: None, alert: false }
    }

    fn alert(text: String) -> Self {
        Self { text: Some(text), alert: true }
    }

    fn notice(text: String) -> Self {
        Self { text: Some(text), alert: false }
    }
}

fn review_message(message: &Message) -> ReviewMessage {
    let (body, has_caption) = match message.text() {
        Some(text) => (text.to_string(), false),
        None => (message.caption().unwrap_or_default().to_string(), true),
    };

    ReviewMessage {
        chat: message.chat.id,
        message: message.id,
        body,
        has_caption,
    }
}

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let profile = CreateUserRequest::from(&query.from);
    let user_id = profile.user_id;
    let message = query.regular_message();

    debug!(user_id = user_id, callback_data = ?query.data, "Processing callback query");

    let Some(action) = query.data.as_deref().and_then(CallbackAction::parse) else {
        warn!(user_id = user_id, data = ?query.data, "Unknown callback data");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let screen = match message {
        Some(message) => Screen::Edit(message.chat.id, message.id),
        None => Screen::New(ChatId(user_id)),
    };

    let result = dispatch(&services, action, profile, screen, message).await;

    let answer = match result {
        Ok(answer) => answer,
        Err(NewsRelayError::PermissionDenied(reason)) => {
            warn!(user_id = user_id, reason = %reason, "Permission denied");
            Answer::alert(texts::not_admin())
        }
        Err(e) => {
            if let Err(answer_error) = bot.answer_callback_query(query.id.clone()).await {
                warn!(error = %answer_error, "Failed to answer callback query");
            }
            return Err(e);
        }
    };

    let mut request = bot.answer_callback_query(query.id.clone());
    if let Some(text) = answer.text {
        request = request.text(text).show_alert(answer.alert);
    }
    if let Err(e) = request.await {
        warn!(error = %e, "Failed to answer callback query");
    }

    Ok(())
}

async fn dispatch(
    services: &ServiceFactory,
    action: CallbackAction,
    profile: CreateUserRequest,
    screen: Screen,
    message: Option<&Message>,
) -> Result<Answer> {
    let user_id = profile.user_id;

    match action {
        CallbackAction::Submit => {
            // A refusal was already shown to the user
            let _ = services.submission_service.begin(profile, screen).await?;
        }
        CallbackAction::Forward(allow_forward) => {
            if services
                .submission_service
                .choose_forward(profile, allow_forward, screen)
                .await?
                .is_none()
            {
                return Ok(Answer::alert("Nothing to submit. Start again with /submit.".to_string()));
            }
        }
        CallbackAction::MyStats => services.menu_service.user_stats(user_id, screen).await?,
        CallbackAction::MyPending => services.menu_service.my_pending(user_id, screen).await?,
        CallbackAction::BackToMain => services.menu_service.main_menu(user_id, screen).await?,
        CallbackAction::Cancel => services.menu_service.cancel(user_id, screen).await?,
        CallbackAction::AdminPanel => services.menu_service.admin_panel(user_id, screen).await?,
        CallbackAction::BotStats => services.menu_service.bot_stats(user_id, screen).await?,
        CallbackAction::ChangeChannel => services.setup_service.begin_channel_setup(user_id, screen).await?,
        CallbackAction::ReviewQueue => {
            services.moderation_service.open_review_queue(user_id, screen).await?
        }
        CallbackAction::Approve { submission_id, mode } => {
            let review = message.map(review_message);
            let outcome = services
                .moderation_service
                .approve(user_id, submission_id, mode, review.as_ref())
                .await?;
            return Ok(if outcome.is_failure() {
                Answer::alert(outcome.notice())
            } else {
                Answer::notice(outcome.notice())
            });
        }
        CallbackAction::Reject { submission_id } => {
            let review = message.map(review_message);
            let outcome = services
                .moderation_service
                .reject(user_id, submission_id, review.as_ref())
                .await?;
            return Ok(if outcome.is_failure() {
                Answer::alert(outcome.notice())
            } else {
                Answer::notice(outcome.notice())
            });
        }
    }

    Ok(Answer::silent())
}
