//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod connector;
pub mod menu;
pub mod moderation;
pub mod setup;
pub mod submission;
pub mod telegram;

// Re-export commonly used services
pub use auth::AuthService;
pub use connector::{ChatConnector, ChatKind, ChatSummary};
pub use menu::MenuService;
pub use moderation::{ModerationOutcome, ModerationService, ReviewMessage};
pub use setup::{ChannelSetupOutcome, ClaimOutcome, SetupService};
pub use submission::{StartRefusal, SubmissionService};
pub use telegram::TelegramConnector;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::state::StateStorage;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub database: DatabaseService,
    pub states: Arc<StateStorage>,
    pub auth_service: AuthService,
    pub menu_service: MenuService,
    pub setup_service: SetupService,
    pub submission_service: SubmissionService,
    pub moderation_service: ModerationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        database: DatabaseService,
        connector: Arc<dyn ChatConnector>,
        states: Arc<StateStorage>,
        settings: &Settings,
    ) -> Self {
        let auth_service = AuthService::new(database.clone());
        let menu_service = MenuService::new(
            database.clone(),
            auth_service.clone(),
            states.clone(),
            connector.clone(),
        );
        let moderation_service = ModerationService::new(
            database.clone(),
            auth_service.clone(),
            connector.clone(),
            settings.moderation.review_batch_size,
        );
        let setup_service = SetupService::new(
            database.clone(),
            auth_service.clone(),
            states.clone(),
            connector.clone(),
            menu_service.clone(),
        );
        let submission_service = SubmissionService::new(
            database.clone(),
            states.clone(),
            connector,
            moderation_service.clone(),
        );

        Self {
            database,
            states,
            auth_service,
            menu_service,
            setup_service,
            submission_service,
            moderation_service,
        }
    }
}
