//! Test context for integration tests
//!
//! Wires the real services to an in-memory database and the recording
//! connector.

use std::sync::Arc;
use teloxide::types::ChatId;
use NewsRelay::config::Settings;
use NewsRelay::models::setting::ChannelRef;
use NewsRelay::models::submission::Submission;
use NewsRelay::services::ServiceFactory;
use NewsRelay::state::{CapturedContent, StateStorage};
use NewsRelay::views::Screen;

use super::database_helper::TestDatabase;
use super::telegram_mock::RecordingConnector;
use super::test_data::{user_profile, ADMIN_ID, CHANNEL_ID, CHANNEL_USERNAME};

pub struct TestContext {
    pub database: TestDatabase,
    pub connector: Arc<RecordingConnector>,
    pub services: ServiceFactory,
    pub settings: Settings,
}

impl TestContext {
    /// Fresh bot with no admin and no channel
    pub async fn new() -> Self {
        Self::with_database(TestDatabase::new().await).await
    }

    pub async fn with_database(database: TestDatabase) -> Self {
        let mut settings = Settings::default();
        settings.bot.token = "123456:TEST_TOKEN".to_string();

        let connector = Arc::new(RecordingConnector::new());
        connector.add_channel(CHANNEL_ID, Some(CHANNEL_USERNAME), "Test News");

        let states = Arc::new(StateStorage::from_config(&settings.submission));
        let services = ServiceFactory::new(
            database.service.clone(),
            connector.clone(),
            states,
            &settings,
        );

        Self {
            database,
            connector,
            services,
            settings,
        }
    }

    /// Bot with the admin claimed and the channel connected
    pub async fn configured() -> Self {
        let context = Self::new().await;
        context.make_admin(ADMIN_ID).await;
        context
            .database
            .service
            .settings
            .set_channel_id(&ChannelRef::Id(CHANNEL_ID))
            .await
            .expect("store channel");
        context
    }

    pub async fn make_admin(&self, user_id: i64) {
        self.database
            .service
            .register_user(user_profile(user_id, "Admin", Some("admin")))
            .await
            .expect("register admin");
        self.database
            .service
            .settings
            .set_admin(user_id)
            .await
            .expect("store admin");
    }

    /// Run the whole submission flow for `user_id`, returning the new id
    pub async fn submit(&self, user_id: i64, content: CapturedContent, allow_forward: bool) -> i64 {
        let profile = user_profile(user_id, "Anna", Some("anna"));
        let screen = Screen::New(ChatId(user_id));

        self.services
            .submission_service
            .begin(profile.clone(), screen)
            .await
            .expect("begin")
            .expect("submission allowed");
        self.services
            .submission_service
            .capture(user_id, Some(content))
            .await
            .expect("capture");
        self.services
            .submission_service
            .choose_forward(profile, allow_forward, screen)
            .await
            .expect("choose forward")
            .expect("submission recorded")
    }

    pub async fn submission(&self, submission_id: i64) -> Submission {
        self.database
            .service
            .submissions
            .find_by_id(submission_id)
            .await
            .expect("query submission")
            .expect("submission exists")
    }
}
