//! Repository for the `feedback_tokens` table.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use worktrack_core::feedback::FeedbackPayload;
use worktrack_core::types::DbId;

use crate::models::feedback_token::{FeedbackToken, FeedbackTokenStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, token, used, used_at, created_at";

/// Result of a redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The token was consumed and the feedback written to this project.
    Redeemed { project_id: DbId },
    NotFound,
    AlreadyUsed,
}

/// Issues and consumes one-time feedback tokens.
pub struct FeedbackTokenRepo;

impl FeedbackTokenRepo {
    /// Insert a new, unused token inside an open transaction.
    ///
    /// The caller commits only once the client notification went out, so a
    /// failed send leaves no row behind.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        token: Uuid,
    ) -> Result<FeedbackToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback_tokens (project_id, token)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeedbackToken>(&query)
            .bind(project_id)
            .bind(token)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a token by its value.
    pub async fn find_by_token(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<FeedbackToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback_tokens WHERE token = $1");
        sqlx::query_as::<_, FeedbackToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// All tokens issued for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FeedbackToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback_tokens
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, FeedbackToken>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Token state plus the project name, for the public feedback page.
    pub async fn status(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<FeedbackTokenStatus>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackTokenStatus>(
            "SELECT p.name AS project_name, t.used
             FROM feedback_tokens t
             JOIN projects p ON p.id = t.project_id
             WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Consume `token` and write `payload` onto its project, atomically.
    ///
    /// The `Issued -> Used` transition is a conditional update, so of any
    /// number of concurrent calls for the same token exactly one sees
    /// [`RedeemOutcome::Redeemed`]. The project update happens in the same
    /// transaction; either both land or neither does.
    pub async fn redeem(
        pool: &PgPool,
        token: Uuid,
        payload: &FeedbackPayload,
    ) -> Result<RedeemOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let consumed: Option<(DbId,)> = sqlx::query_as(
            "UPDATE feedback_tokens SET used = true, used_at = NOW()
             WHERE token = $1 AND used = false
             RETURNING project_id",
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((project_id,)) = consumed else {
            let existing: Option<(bool,)> =
                sqlx::query_as("SELECT used FROM feedback_tokens WHERE token = $1")
                    .bind(token)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Ok(match existing {
                Some(_) => RedeemOutcome::AlreadyUsed,
                None => RedeemOutcome::NotFound,
            });
        };

        sqlx::query(
            "UPDATE projects SET client_feedback = $2, client_confirmed_completed = $3
             WHERE id = $1",
        )
        .bind(project_id)
        .bind(&payload.feedback)
        .bind(payload.confirmed_completed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(project_id, "Feedback token redeemed");
        Ok(RedeemOutcome::Redeemed { project_id })
    }
}
