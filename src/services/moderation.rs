//! Moderation service
//!
//! Admin decisions on pending submissions and delivery of submissions to the
//! admin for review.

use std::sync::Arc;
use teloxide::types::{ChatId, MessageId, Recipient};
use tracing::{info, warn};
use crate::database::DatabaseService;
use crate::models::submission::{
    ContentType, PendingSubmission, PublishMode, Submission, SubmissionStatus, REJECTION_NOTE,
};
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;
use crate::utils::logging::{log_admin_action, log_delivery_failure};
use crate::views::{keyboards, texts, Screen};
use super::auth::AuthService;
use super::connector::ChatConnector;

/// Room left for the review header inside Telegram's 1024 character caption limit
const REVIEW_CAPTION_CHARS: usize = 850;

/// Result of an approve or reject attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    Approved { submission_id: i64, mode: PublishMode },
    Rejected { submission_id: i64 },
    Unauthorized,
    NotFound,
    AlreadyProcessed(SubmissionStatus),
    ChannelMissing,
    /// Publishing failed; the submission stays pending
    PublishFailed(String),
}

impl ModerationOutcome {
    /// Short notice for the callback answer
    pub fn notice(&self) -> String {
        match self {
            ModerationOutcome::Approved { submission_id, mode } => {
                format!("✅ #{} {}", submission_id, mode.decision_text())
            }
            ModerationOutcome::Rejected { submission_id } => format!("❌ #{} rejected", submission_id),
            ModerationOutcome::Unauthorized => "❌ You are not the administrator!".to_string(),
            ModerationOutcome::NotFound => "❌ Submission not found.".to_string(),
            ModerationOutcome::AlreadyProcessed(status) => {
                format!("❌ Submission already processed (status: {}).", status)
            }
            ModerationOutcome::ChannelMissing => "❌ Channel is not connected!".to_string(),
            ModerationOutcome::PublishFailed(error) => {
                format!("❌ Publishing failed: {}", truncate_text(error, 150))
            }
        }
    }

    /// Whether the notice should be shown as a blocking alert
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            ModerationOutcome::Approved { .. } | ModerationOutcome::Rejected { .. }
        )
    }
}

/// The admin's copy of a submission, updated after the decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMessage {
    pub chat: ChatId,
    pub message: MessageId,
    /// Current text or caption
    pub body: String,
    pub has_caption: bool,
}

#[derive(Clone)]
pub struct ModerationService {
    database: DatabaseService,
    auth: AuthService,
    connector: Arc<dyn ChatConnector>,
    review_batch_size: u32,
}

impl ModerationService {
    pub fn new(
        database: DatabaseService,
        auth: AuthService,
        connector: Arc<dyn ChatConnector>,
        review_batch_size: u32,
    ) -> Self {
        Self {
            database,
            auth,
            connector,
            review_batch_size,
        }
    }

    /// Load a submission the admin may still decide on
    async fn decidable(&self, actor: i64, submission_id: i64) -> Result<std::result::Result<Submission, ModerationOutcome>> {
        if !self.auth.is_admin(actor).await? {
            warn!(user_id = actor, submission_id = submission_id, "Unauthorized moderation attempt");
            return Ok(Err(ModerationOutcome::Unauthorized));
        }

        match self.database.submissions.find_by_id(submission_id).await? {
            None => Ok(Err(ModerationOutcome::NotFound)),
            Some(submission) if !submission.is_pending() => {
                Ok(Err(ModerationOutcome::AlreadyProcessed(submission.status)))
            }
            Some(submission) => Ok(Ok(submission)),
        }
    }

    /// Publish a pending submission to the channel
    ///
    /// Attribution is only used when the author consented; otherwise the
    /// submission is published anonymously whatever mode was requested.
    pub async fn approve(
        &self,
        actor: i64,
        submission_id: i64,
        requested: PublishMode,
        review: Option<&ReviewMessage>,
    ) -> Result<ModerationOutcome> {
        let submission = match self.decidable(actor, submission_id).await? {
            Ok(submission) => submission,
            Err(outcome) => return Ok(outcome),
        };

        let Some(channel) = self.database.settings.get_channel_id().await? else {
            return Ok(ModerationOutcome::ChannelMissing);
        };

        let mode = requested.effective(submission.allow_forward);
        if mode != requested {
            info!(submission_id = submission_id, "Author did not consent to attribution, publishing anonymously");
        }

        let destination: Recipient = channel.to_recipient();
        let published = match mode {
            PublishMode::WithAuthor => {
                self.connector
                    .forward_message(destination, submission.source_chat(), submission.source_message())
                    .await
            }
            PublishMode::Anonymous => {
                self.connector
                    .copy_message(destination, submission.source_chat(), submission.source_message(), None, None)
                    .await
            }
        };

        if let Err(e) = published {
            log_delivery_failure("publish", &channel.to_string(), &e.to_string());
            return Ok(ModerationOutcome::PublishFailed(e.to_string()));
        }

        if !self
            .database
            .submissions
            .transition(submission_id, SubmissionStatus::Approved, mode.decision_text())
            .await?
        {
            warn!(submission_id = submission_id, "Submission was decided concurrently after publishing");
            return self.lost_race(submission_id).await;
        }

        log_admin_action(actor, "approve", Some(&submission_id.to_string()), Some(mode.decision_text()));

        self.notify_author(&submission, &texts::approval_notice(submission_id, mode)).await;
        if let Some(review) = review {
            self.mark_review(review, &texts::approved_footer(mode)).await;
        }

        Ok(ModerationOutcome::Approved { submission_id, mode })
    }

    /// Reject a pending submission; nothing is published
    pub async fn reject(
        &self,
        actor: i64,
        submission_id: i64,
        review: Option<&ReviewMessage>,
    ) -> Result<ModerationOutcome> {
        let submission = match self.decidable(actor, submission_id).await? {
            Ok(submission) => submission,
            Err(outcome) => return Ok(outcome),
        };

        if !self
            .database
            .submissions
            .transition(submission_id, SubmissionStatus::Rejected, REJECTION_NOTE)
            .await?
        {
            warn!(submission_id = submission_id, "Submission was decided concurrently");
            return self.lost_race(submission_id).await;
        }

        log_admin_action(actor, "reject", Some(&submission_id.to_string()), None);

        self.notify_author(&submission, &texts::rejection_notice(submission_id)).await;
        if let Some(review) = review {
            self.mark_review(review, &texts::rejected_footer()).await;
        }

        Ok(ModerationOutcome::Rejected { submission_id })
    }

    async fn lost_race(&self, submission_id: i64) -> Result<ModerationOutcome> {
        let status = self
            .database
            .submissions
            .find_by_id(submission_id)
            .await?
            .map(|submission| submission.status);

        Ok(match status {
            Some(status) => ModerationOutcome::AlreadyProcessed(status),
            None => ModerationOutcome::NotFound,
        })
    }

    async fn notify_author(&self, submission: &Submission, text: &str) {
        if let Err(e) = self.connector.send_text(submission.source_chat(), text, None).await {
            log_delivery_failure("notify_author", &submission.user_id.to_string(), &e.to_string());
        }
    }

    async fn mark_review(&self, review: &ReviewMessage, footer: &str) {
        let body = texts::with_footer(&review.body, footer);
        let edited = if review.has_caption {
            self.connector.edit_caption(review.chat, review.message, &body).await
        } else {
            self.connector.edit_text(review.chat, review.message, &body, None).await
        };

        if let Err(e) = edited {
            log_delivery_failure("mark_review", &review.chat.0.to_string(), &e.to_string());
        }
    }

    /// Send a submission to the admin with the moderation controls
    ///
    /// Best-effort: returns `false` when there is no admin or delivery failed.
    pub async fn deliver_for_review(&self, submission: &Submission, author: &str) -> Result<bool> {
        let Some(admin_id) = self.database.settings.get_admin_id().await? else {
            warn!(submission_id = submission.id, "No administrator to review the submission");
            return Ok(false);
        };
        let admin_chat = ChatId(admin_id);

        let header = texts::review_header(submission.id, author, submission.allow_forward);
        let keyboard = keyboards::admin_decision(submission.id, submission.allow_forward);

        let delivered = match submission.content_type {
            ContentType::Text => {
                let copied = self
                    .connector
                    .copy_message(
                        Recipient::Id(admin_chat),
                        submission.source_chat(),
                        submission.source_message(),
                        None,
                        None,
                    )
                    .await;
                match copied {
                    Ok(_) => self.connector.send_text(admin_chat, &header, Some(keyboard)).await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
            _ => {
                let caption = texts::review_caption(
                    &header,
                    &truncate_text(&submission.content, REVIEW_CAPTION_CHARS),
                );
                self.connector
                    .copy_message(
                        Recipient::Id(admin_chat),
                        submission.source_chat(),
                        submission.source_message(),
                        Some(caption),
                        Some(keyboard),
                    )
                    .await
                    .map(|_| ())
            }
        };

        match delivered {
            Ok(()) => {
                info!(submission_id = submission.id, admin_id = admin_id, "Submission delivered for review");
                Ok(true)
            }
            Err(e) => {
                log_delivery_failure("deliver_for_review", &admin_id.to_string(), &e.to_string());
                Ok(false)
            }
        }
    }

    /// Show the FIFO queue summary and re-deliver the oldest pending submissions
    pub async fn open_review_queue(&self, actor: i64, screen: Screen) -> Result<()> {
        self.auth.require_admin(actor, "open the review queue").await?;

        let total = self.database.submissions.count_pending().await?;
        let batch: Vec<PendingSubmission> = self
            .database
            .submissions
            .list_pending(Some(self.review_batch_size as i64))
            .await?;

        screen
            .show(
                self.connector.as_ref(),
                &texts::review_queue(&batch, total),
                Some(keyboards::back_to_admin_panel()),
            )
            .await?;

        for item in &batch {
            self.deliver_for_review(&item.submission, &item.author_name()).await?;
        }

        info!(admin_id = actor, shown = batch.len(), total = total, "Review queue opened");
        Ok(())
    }
}
