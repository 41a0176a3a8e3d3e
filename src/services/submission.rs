//! Submission service
//!
//! Drives a user from "submit" through content capture and the forwarding
//! consent choice to a recorded pending submission.
//!
//! ```text
//! idle -> AwaitingContent -> AwaitingForwardChoice -> recorded (idle)
//! ```

use std::sync::Arc;
use tracing::{debug, error, info};
use crate::database::DatabaseService;
use crate::models::submission::CreateSubmissionRequest;
use crate::models::user::CreateUserRequest;
use crate::state::{CapturedContent, ConversationState, StateStorage};
use crate::utils::errors::Result;
use crate::utils::logging::{log_delivery_failure, log_user_action};
use crate::views::{keyboards, texts, Screen};
use super::connector::ChatConnector;
use super::moderation::ModerationService;

/// Why a submission could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRefusal {
    Banned,
    ChannelMissing,
}

#[derive(Clone)]
pub struct SubmissionService {
    database: DatabaseService,
    states: Arc<StateStorage>,
    connector: Arc<dyn ChatConnector>,
    moderation: ModerationService,
}

impl SubmissionService {
    pub fn new(
        database: DatabaseService,
        states: Arc<StateStorage>,
        connector: Arc<dyn ChatConnector>,
        moderation: ModerationService,
    ) -> Self {
        Self {
            database,
            states,
            connector,
            moderation,
        }
    }

    /// Enter content capture
    ///
    /// Banned users and a missing channel keep the user idle with an explanation.
    pub async fn begin(
        &self,
        profile: CreateUserRequest,
        screen: Screen,
    ) -> Result<std::result::Result<(), StartRefusal>> {
        let user_id = profile.user_id;
        self.database.register_user(profile).await?;

        let refusal = if self.database.users.is_banned(user_id).await? {
            Some(StartRefusal::Banned)
        } else if self.database.settings.get_channel_id().await?.is_none() {
            Some(StartRefusal::ChannelMissing)
        } else {
            None
        };

        if let Some(refusal) = refusal {
            self.states.clear(user_id);
            debug!(user_id = user_id, refusal = ?refusal, "Submission not started");
            let text = match refusal {
                StartRefusal::Banned => texts::banned(),
                StartRefusal::ChannelMissing => texts::channel_not_configured(),
            };
            screen.show(self.connector.as_ref(), &text, None).await?;
            return Ok(Err(refusal));
        }

        self.states.set(user_id, ConversationState::AwaitingContent);
        log_user_action(user_id, "submission_started", None);
        screen
            .show(self.connector.as_ref(), &texts::submission_prompt(), Some(keyboards::cancel()))
            .await?;
        Ok(Ok(()))
    }

    /// Handle a message while awaiting content
    ///
    /// `None` is an unsupported message kind: the user is re-prompted and the
    /// state is kept.
    pub async fn capture(&self, user_id: i64, content: Option<CapturedContent>) -> Result<()> {
        let chat = teloxide::types::ChatId(user_id);

        let Some(content) = content else {
            self.connector
                .send_text(chat, &texts::unsupported_content(), Some(keyboards::cancel()))
                .await?;
            return Ok(());
        };

        debug!(user_id = user_id, content_type = %content.content_type, "Content captured");
        self.states.set(user_id, ConversationState::AwaitingForwardChoice(content));
        self.connector
            .send_text(chat, &texts::content_received(), Some(keyboards::forward_choice()))
            .await?;
        Ok(())
    }

    /// Record the submission after the consent choice
    ///
    /// Returns the new submission id, or `None` when no content was captured.
    /// The state is cleared even when delivery to the admin fails.
    pub async fn choose_forward(
        &self,
        profile: CreateUserRequest,
        allow_forward: bool,
        screen: Screen,
    ) -> Result<Option<i64>> {
        let user_id = profile.user_id;
        let Some(ConversationState::AwaitingForwardChoice(content)) = self.states.get(user_id) else {
            debug!(user_id = user_id, "Forward choice without captured content");
            return Ok(None);
        };
        self.states.clear(user_id);

        let author = profile.display_name();
        self.database.register_user(profile).await?;

        let submission_id = self
            .database
            .submissions
            .create(CreateSubmissionRequest {
                user_id,
                message_id: content.message_id as i64,
                content_type: content.content_type,
                content: content.content,
                allow_forward,
            })
            .await?;

        log_user_action(
            user_id,
            "submission_recorded",
            Some(&format!("#{} allow_forward={}", submission_id, allow_forward)),
        );

        if let Err(e) = screen
            .show(self.connector.as_ref(), &texts::submission_sent(submission_id), None)
            .await
        {
            log_delivery_failure("confirm_submission", &user_id.to_string(), &e.to_string());
        }

        match self.database.submissions.find_by_id(submission_id).await? {
            Some(submission) => match self.moderation.deliver_for_review(&submission, &author).await {
                Ok(true) => {}
                Ok(false) => info!(submission_id = submission_id, "Submission is waiting in the review queue"),
                Err(e) => error!(submission_id = submission_id, error = %e, "Delivery for review failed"),
            },
            None => error!(submission_id = submission_id, "Recorded submission disappeared"),
        }

        Ok(Some(submission_id))
    }
}
