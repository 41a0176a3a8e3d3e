//! Admin claim and channel setup tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use teloxide::types::ChatId;
use NewsRelay::models::setting::{ChannelInputError, ChannelRef};
use NewsRelay::services::{ChannelSetupOutcome, ChatKind, ChatSummary, ClaimOutcome};
use NewsRelay::state::ConversationState;
use NewsRelay::utils::errors::NewsRelayError;
use NewsRelay::utils::helpers::ADMIN_CODE_LENGTH;
use NewsRelay::views::Screen;

async fn setup_code(ctx: &TestContext) -> String {
    ctx.database
        .service
        .settings
        .get_admin_code()
        .await
        .unwrap()
        .expect("setup code generated")
}

#[tokio::test]
#[serial]
async fn test_setup_code_is_stable_until_claimed() {
    let ctx = TestContext::new().await;

    let announced = ctx.services.setup_service.announce_pending_setup().await.unwrap();
    let again = ctx.services.setup_service.announce_pending_setup().await.unwrap();

    assert!(announced.is_some());
    assert_eq!(announced, again);
    assert_eq!(announced.unwrap().len(), ADMIN_CODE_LENGTH);
}

#[tokio::test]
#[serial]
async fn test_first_user_claims_admin_with_code() {
    let ctx = TestContext::new().await;
    let setup = &ctx.services.setup_service;

    setup.start(user_profile(USER_ID, "Anna", None)).await.unwrap();
    assert_eq!(ctx.services.states.get(USER_ID), Some(ConversationState::AwaitingAdminCode));
    assert!(ctx.connector.last_text_to(ChatId(USER_ID)).unwrap().contains("admin code"));

    let wrong = setup.submit_admin_code(USER_ID, "NOTACODE").await.unwrap();
    assert_eq!(wrong, ClaimOutcome::WrongCode);
    assert_eq!(ctx.services.states.get(USER_ID), Some(ConversationState::AwaitingAdminCode));
    assert!(!ctx.services.auth_service.has_admin().await.unwrap());

    let code = setup_code(&ctx).await;
    let claimed = setup
        .submit_admin_code(USER_ID, &format!("  {}  ", code.to_lowercase()))
        .await
        .unwrap();
    assert_eq!(claimed, ClaimOutcome::Claimed);

    assert_eq!(ctx.database.service.settings.get_admin_id().await.unwrap(), Some(USER_ID));
    assert_eq!(ctx.database.service.settings.get_admin_code().await.unwrap(), None);
    assert_eq!(ctx.services.states.get(USER_ID), None);
    assert!(ctx
        .connector
        .texts_to(ChatId(USER_ID))
        .iter()
        .any(|text| text.contains("now the administrator")));
}

#[tokio::test]
#[serial]
async fn test_second_claim_is_refused() {
    let ctx = TestContext::new().await;
    let setup = &ctx.services.setup_service;

    setup.start(user_profile(USER_ID, "Anna", None)).await.unwrap();
    setup.start(user_profile(OTHER_USER_ID, "Boris", None)).await.unwrap();
    let code = setup_code(&ctx).await;

    assert_eq!(setup.submit_admin_code(USER_ID, &code).await.unwrap(), ClaimOutcome::Claimed);
    assert_eq!(
        setup.submit_admin_code(OTHER_USER_ID, &code).await.unwrap(),
        ClaimOutcome::AlreadyClaimed
    );

    assert_eq!(ctx.database.service.settings.get_admin_id().await.unwrap(), Some(USER_ID));
    assert_eq!(ctx.services.states.get(OTHER_USER_ID), None);
}

#[tokio::test]
#[serial]
async fn test_start_after_setup_shows_menu() {
    let ctx = TestContext::configured().await;

    ctx.services
        .setup_service
        .start(user_profile(USER_ID, "Anna", None))
        .await
        .unwrap();

    assert_eq!(ctx.services.states.get(USER_ID), None);
    assert!(ctx.connector.last_text_to(ChatId(USER_ID)).unwrap().contains("Anna"));
    assert!(ctx.database.service.users.find_by_id(USER_ID).await.unwrap().is_some());
}

async fn begin_channel_setup(ctx: &TestContext) {
    ctx.services
        .setup_service
        .begin_channel_setup(ADMIN_ID, Screen::New(ChatId(ADMIN_ID)))
        .await
        .unwrap();
    assert_eq!(ctx.services.states.get(ADMIN_ID), Some(ConversationState::AwaitingChannel));
}

#[tokio::test]
#[serial]
async fn test_channel_connected_by_username() {
    let ctx = TestContext::new().await;
    ctx.make_admin(ADMIN_ID).await;
    begin_channel_setup(&ctx).await;

    let outcome = ctx
        .services
        .setup_service
        .submit_channel(ADMIN_ID, "https://t.me/test_news")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ChannelSetupOutcome::Connected {
            channel_id: CHANNEL_ID,
            title: Some("Test News".to_string()),
        }
    );
    assert_eq!(
        ctx.database.service.settings.get_channel_id().await.unwrap(),
        Some(ChannelRef::Id(CHANNEL_ID))
    );
    assert_eq!(ctx.services.states.get(ADMIN_ID), None);
}

#[tokio::test]
#[serial]
async fn test_channel_input_errors_keep_waiting() {
    let ctx = TestContext::new().await;
    ctx.make_admin(ADMIN_ID).await;
    begin_channel_setup(&ctx).await;
    let setup = &ctx.services.setup_service;

    assert_eq!(
        setup.submit_channel(ADMIN_ID, "https://t.me/+AbCdEf").await.unwrap(),
        ChannelSetupOutcome::InvalidInput(ChannelInputError::PrivateInvite)
    );
    assert_eq!(
        setup.submit_channel(ADMIN_ID, "not a channel!").await.unwrap(),
        ChannelSetupOutcome::InvalidInput(ChannelInputError::UnrecognizedFormat)
    );
    assert_matches!(
        setup.submit_channel(ADMIN_ID, "@unknown_channel").await.unwrap(),
        ChannelSetupOutcome::LookupFailed(_)
    );

    assert_eq!(ctx.services.states.get(ADMIN_ID), Some(ConversationState::AwaitingChannel));
    assert_eq!(ctx.database.service.settings.get_channel_id().await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_channel_must_accept_bot_posts() {
    let ctx = TestContext::new().await;
    ctx.make_admin(ADMIN_ID).await;
    ctx.connector.add_chat(
        "@someone",
        ChatSummary {
            id: ChatId(555),
            title: None,
            kind: ChatKind::Private,
        },
    );
    ctx.connector.add_chat(
        "@foreign_news",
        ChatSummary {
            id: ChatId(-100_777),
            title: Some("Foreign".to_string()),
            kind: ChatKind::Channel,
        },
    );
    begin_channel_setup(&ctx).await;
    let setup = &ctx.services.setup_service;

    assert_eq!(
        setup.submit_channel(ADMIN_ID, "@someone").await.unwrap(),
        ChannelSetupOutcome::NotPublishable
    );
    assert_eq!(
        setup.submit_channel(ADMIN_ID, "@foreign_news").await.unwrap(),
        ChannelSetupOutcome::BotNotAdmin
    );
    assert_eq!(ctx.database.service.settings.get_channel_id().await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_channel_setup_requires_admin() {
    let ctx = TestContext::new().await;
    ctx.make_admin(ADMIN_ID).await;
    ctx.services.states.set(USER_ID, ConversationState::AwaitingChannel);

    let result = ctx
        .services
        .setup_service
        .submit_channel(USER_ID, &CHANNEL_ID.to_string())
        .await;

    assert_matches!(result, Err(NewsRelayError::PermissionDenied(_)));
    assert_eq!(ctx.services.states.get(USER_ID), None);
    assert_eq!(ctx.database.service.settings.get_channel_id().await.unwrap(), None);

    let begin = ctx
        .services
        .setup_service
        .begin_channel_setup(USER_ID, Screen::New(ChatId(USER_ID)))
        .await;
    assert_matches!(begin, Err(NewsRelayError::PermissionDenied(_)));
}

#[tokio::test]
#[serial]
async fn test_start_issues_setup_code_once() {
    let ctx = TestContext::new().await;
    let setup = &ctx.services.setup_service;
    assert_eq!(ctx.database.service.settings.get_admin_code().await.unwrap(), None);

    setup.start(user_profile(USER_ID, "Anna", None)).await.unwrap();
    let issued = setup_code(&ctx).await;

    setup.start(user_profile(OTHER_USER_ID, "Boris", None)).await.unwrap();
    setup.start(user_profile(USER_ID, "Anna", None)).await.unwrap();

    assert_eq!(setup_code(&ctx).await, issued);
    assert_eq!(
        setup.announce_pending_setup().await.unwrap(),
        Some(issued)
    );
}
