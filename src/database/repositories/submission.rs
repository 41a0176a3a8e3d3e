//! Submission repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use tracing::{debug, info};
use crate::models::submission::{
    Submission, PendingSubmission, CreateSubmissionRequest, SubmissionStatus, UserStats,
};
use crate::utils::errors::NewsRelayError;

const SUBMISSION_COLUMNS: &str =
    "s.id, s.user_id, s.message_id, s.content_type, s.content, s.allow_forward, s.status, s.admin_decision, s.created_at";

const STATS_COLUMNS: &str = r#"
    COUNT(*) AS total,
    COALESCE(SUM(CASE WHEN status = 'approved' THEN 1 ELSE 0 END), 0) AS approved,
    COALESCE(SUM(CASE WHEN status = 'rejected' THEN 1 ELSE 0 END), 0) AS rejected,
    COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending
"#;

#[derive(Clone, Debug)]
pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a new pending submission and return its id
    pub async fn create(&self, request: CreateSubmissionRequest) -> Result<i64, NewsRelayError> {
        let result = sqlx::query(
            r#"
            INSERT INTO submissions (user_id, message_id, content_type, content, allow_forward, status, created_at)
            VALUES (?, ?, ?, ?, ?, 'pending', ?)
            "#
        )
        .bind(request.user_id)
        .bind(request.message_id)
        .bind(request.content_type)
        .bind(request.content)
        .bind(request.allow_forward)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(submission_id = id, user_id = request.user_id, "Submission recorded");
        Ok(id)
    }

    /// Find submission by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Submission>, NewsRelayError> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {} FROM submissions s WHERE s.id = ?",
            SUBMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }

    /// Move a pending submission to its final status
    ///
    /// Conditional on the row still being pending; returns `false` when another
    /// decision got there first or the id is unknown.
    pub async fn transition(
        &self,
        id: i64,
        to: SubmissionStatus,
        decision: &str,
    ) -> Result<bool, NewsRelayError> {
        if !to.is_final() {
            return Err(NewsRelayError::InvalidStateTransition {
                from: SubmissionStatus::Pending.to_string(),
                to: to.to_string(),
            });
        }

        let result = sqlx::query(
            "UPDATE submissions SET status = ?, admin_decision = ? WHERE id = ? AND status = 'pending'"
        )
        .bind(to)
        .bind(decision)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let applied = result.rows_affected() > 0;
        debug!(submission_id = id, status = %to, applied = applied, "Submission transition");
        Ok(applied)
    }

    /// Count pending submissions
    pub async fn count_pending(&self) -> Result<i64, NewsRelayError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Pending submissions with their authors, oldest first
    pub async fn list_pending(&self, limit: Option<i64>) -> Result<Vec<PendingSubmission>, NewsRelayError> {
        let submissions = sqlx::query_as::<_, PendingSubmission>(&format!(
            r#"
            SELECT {}, u.username, u.first_name
            FROM submissions s
            LEFT JOIN users u ON u.user_id = s.user_id
            WHERE s.status = 'pending'
            ORDER BY s.created_at ASC, s.id ASC
            LIMIT ?
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }

    /// Pending submissions of one user, oldest first
    pub async fn list_user_pending(&self, user_id: i64) -> Result<Vec<Submission>, NewsRelayError> {
        let submissions = sqlx::query_as::<_, Submission>(&format!(
            r#"
            SELECT {}
            FROM submissions s
            WHERE s.user_id = ? AND s.status = 'pending'
            ORDER BY s.created_at ASC, s.id ASC
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }

    /// Per-user counters
    pub async fn user_stats(&self, user_id: i64) -> Result<UserStats, NewsRelayError> {
        let stats = sqlx::query_as::<_, UserStats>(&format!(
            "SELECT {} FROM submissions WHERE user_id = ?",
            STATS_COLUMNS
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Counters across all submissions
    pub async fn count_by_status(&self) -> Result<UserStats, NewsRelayError> {
        let stats = sqlx::query_as::<_, UserStats>(&format!("SELECT {} FROM submissions", STATS_COLUMNS))
            .fetch_one(&self.pool)
            .await?;

        Ok(stats)
    }
}
