//! Help command handler

use teloxide::types::Message;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::handlers::sender;
use crate::views::Screen;

/// Handle /help command
pub async fn handle_help(msg: Message, services: ServiceFactory) -> Result<()> {
    let user = sender(&msg)?;
    services.menu_service.help(user.user_id, Screen::New(msg.chat.id)).await
}
