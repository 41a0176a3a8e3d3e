//! End-to-end moderation flows
//!
//! A user submits content, the admin decides, and the channel and the author
//! see the result.

mod helpers;

use helpers::*;
use serial_test::serial;
use teloxide::types::{ChatId, MessageId, Recipient};
use NewsRelay::models::submission::{PublishMode, SubmissionStatus};
use NewsRelay::services::{ModerationOutcome, ReviewMessage};
use NewsRelay::views::Screen;

fn channel() -> Recipient {
    Recipient::Id(ChatId(CHANNEL_ID))
}

#[tokio::test]
#[serial]
async fn test_text_submission_published_with_author() {
    let ctx = TestContext::configured().await;

    let submission_id = ctx.submit(USER_ID, text_content(42, "Hello"), true).await;
    let submission = ctx.submission(submission_id).await;
    assert_eq!(submission.status, SubmissionStatus::Pending);
    assert!(submission.allow_forward);
    assert_eq!(submission.content, "Hello");

    // The admin got a copy and the moderation header
    let admin_texts = ctx.connector.texts_to(ChatId(ADMIN_ID));
    assert!(admin_texts.iter().any(|text| text.contains(&format!("#{}", submission_id))));

    let outcome = ctx
        .services
        .moderation_service
        .approve(ADMIN_ID, submission_id, PublishMode::WithAuthor, None)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ModerationOutcome::Approved {
            submission_id,
            mode: PublishMode::WithAuthor,
        }
    );

    let submission = ctx.submission(submission_id).await;
    assert_eq!(submission.status, SubmissionStatus::Approved);
    assert_eq!(
        submission.admin_decision.as_deref(),
        Some(PublishMode::WithAuthor.decision_text())
    );

    assert!(ctx.connector.sent().contains(&Sent::Forward {
        to: channel(),
        from: ChatId(USER_ID),
        message: MessageId(42),
    }));

    let notice = ctx.connector.last_text_to(ChatId(USER_ID)).unwrap();
    assert!(notice.contains("approved"));
    assert!(notice.contains(&format!("#{}", submission_id)));
}

#[tokio::test]
#[serial]
async fn test_photo_submission_rejected() {
    let ctx = TestContext::configured().await;

    let submission_id = ctx.submit(USER_ID, photo_content(7, "Look"), false).await;

    let outcome = ctx
        .services
        .moderation_service
        .reject(ADMIN_ID, submission_id, None)
        .await
        .unwrap();
    assert_eq!(outcome, ModerationOutcome::Rejected { submission_id });

    let submission = ctx.submission(submission_id).await;
    assert_eq!(submission.status, SubmissionStatus::Rejected);
    assert!(submission.admin_decision.is_some());

    let published = ctx
        .connector
        .sent()
        .into_iter()
        .filter(|sent| sent.destination() == channel())
        .count();
    assert_eq!(published, 0);

    let notice = ctx.connector.last_text_to(ChatId(USER_ID)).unwrap();
    assert!(notice.contains("rejected"));
}

#[tokio::test]
#[serial]
async fn test_attribution_without_consent_publishes_anonymously() {
    let ctx = TestContext::configured().await;

    let submission_id = ctx.submit(USER_ID, text_content(9, "Quiet news"), false).await;

    let outcome = ctx
        .services
        .moderation_service
        .approve(ADMIN_ID, submission_id, PublishMode::WithAuthor, None)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ModerationOutcome::Approved {
            submission_id,
            mode: PublishMode::Anonymous,
        }
    );

    let to_channel: Vec<Sent> = ctx
        .connector
        .sent()
        .into_iter()
        .filter(|sent| sent.destination() == channel())
        .collect();
    assert_eq!(to_channel.len(), 1);
    assert!(matches!(
        &to_channel[0],
        Sent::Copy { from, message, caption: None, .. } if *from == ChatId(USER_ID) && *message == MessageId(9)
    ));
}

#[tokio::test]
#[serial]
async fn test_review_message_marked_after_decision() {
    let ctx = TestContext::configured().await;
    let submission_id = ctx.submit(USER_ID, photo_content(11, "Storm"), true).await;

    let review = ReviewMessage {
        chat: ChatId(ADMIN_ID),
        message: MessageId(900),
        body: "New submission".to_string(),
        has_caption: true,
    };

    ctx.services
        .moderation_service
        .approve(ADMIN_ID, submission_id, PublishMode::Anonymous, Some(&review))
        .await
        .unwrap();

    let edited = ctx.connector.sent().into_iter().find_map(|sent| match sent {
        Sent::EditCaption { message, caption, .. } if message == MessageId(900) => Some(caption),
        _ => None,
    });
    let caption = edited.expect("review caption edited");
    assert!(caption.starts_with("New submission"));
    assert!(caption.contains("APPROVED"));
}

#[tokio::test]
#[serial]
async fn test_user_statistics_follow_decisions() {
    let ctx = TestContext::configured().await;

    let first = ctx.submit(USER_ID, text_content(1, "one"), true).await;
    let second = ctx.submit(USER_ID, text_content(2, "two"), true).await;
    ctx.submit(USER_ID, text_content(3, "three"), true).await;

    let moderation = &ctx.services.moderation_service;
    moderation.approve(ADMIN_ID, first, PublishMode::Anonymous, None).await.unwrap();
    moderation.reject(ADMIN_ID, second, None).await.unwrap();

    let stats = ctx.database.service.submissions.user_stats(USER_ID).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.pending, 1);
}

#[tokio::test]
#[serial]
async fn test_admin_panel_and_bot_statistics() {
    let ctx = TestContext::configured().await;
    let approved = ctx.submit(USER_ID, text_content(1, "one"), true).await;
    ctx.submit(OTHER_USER_ID, text_content(2, "two"), true).await;
    ctx.services
        .moderation_service
        .approve(ADMIN_ID, approved, PublishMode::Anonymous, None)
        .await
        .unwrap();

    let stats = ctx.database.service.bot_stats().await.unwrap();
    assert_eq!(stats.users, 3);
    assert_eq!(stats.submissions.total, 2);
    assert_eq!(stats.submissions.approved, 1);
    assert_eq!(stats.submissions.pending, 1);

    let admin_chat = ChatId(ADMIN_ID);
    ctx.services
        .menu_service
        .admin_panel(ADMIN_ID, Screen::New(admin_chat))
        .await
        .unwrap();
    assert!(ctx.connector.last_text_to(admin_chat).unwrap().contains("Pending submissions: 1"));

    let denied = ctx
        .services
        .menu_service
        .bot_stats(USER_ID, Screen::New(ChatId(USER_ID)))
        .await;
    assert!(denied.is_err());
}
