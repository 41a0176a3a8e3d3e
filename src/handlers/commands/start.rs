//! Start command handler
//!
//! Handles the /start command: admin setup on a fresh install, the main menu
//! afterwards.

use teloxide::types::Message;
use tracing::debug;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::handlers::sender;

/// Handle /start command - main entry point
pub async fn handle_start(msg: Message, services: ServiceFactory) -> Result<()> {
    let profile = sender(&msg)?;
    debug!(user_id = profile.user_id, "Processing /start command");

    services.setup_service.start(profile).await
}
