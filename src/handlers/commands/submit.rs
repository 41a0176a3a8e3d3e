//! Submission command handlers

use teloxide::types::Message;
use tracing::debug;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::handlers::sender;
use crate::views::Screen;

/// Handle /submit command
pub async fn handle_submit(msg: Message, services: ServiceFactory) -> Result<()> {
    let profile = sender(&msg)?;
    debug!(user_id = profile.user_id, "Processing /submit command");

    services
        .submission_service
        .begin(profile, Screen::New(msg.chat.id))
        .await
        .map(|_| ())
}

/// Handle /stats command
pub async fn handle_stats(msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    services.menu_service.user_stats(user.user_id, Screen::New(msg.chat.id)).await
}

/// Handle /pending command; also interrupts a submission in progress
pub async fn handle_pending(msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    services.menu_service.my_pending(user.user_id, Screen::New(msg.chat.id)).await
}

/// Handle /cancel command
pub async fn handle_cancel(msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    services.menu_service.cancel(user.user_id, Screen::New(msg.chat.id)).await
}
