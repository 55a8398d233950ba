//! Repository for the `work_logs` table.

use sqlx::PgPool;
use worktrack_core::types::{Day, DbId};
use worktrack_core::worklog::WorkLogDraft;

use crate::models::work_log::WorkLog;

/// Columns selected from `work_logs` aliased as `w`, joined to `users` as `u`.
const COLUMNS: &str = "w.id, w.project_id, w.user_id, u.username, w.log_date, \
                       w.description, w.hours_worked, w.created_at, w.updated_at";

/// Provides persistence for work logs.
pub struct WorkLogRepo;

impl WorkLogRepo {
    /// Whether `user_id` already logged work on `project_id` for `date`.
    pub async fn exists_for_day(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        date: Day,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM work_logs
                WHERE project_id = $1 AND user_id = $2 AND log_date = $3
             )",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(date)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert a validated draft.
    ///
    /// The unique index on `(project_id, user_id, log_date)` is the final
    /// arbiter; a concurrent duplicate surfaces as a `23505` database error
    /// on `uq_work_logs_project_user_date`.
    pub async fn create(pool: &PgPool, draft: &WorkLogDraft) -> Result<WorkLog, sqlx::Error> {
        let query = format!(
            "WITH w AS (
                INSERT INTO work_logs (project_id, user_id, log_date, description, hours_worked)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM w JOIN users u ON u.id = w.user_id"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(draft.project_id)
            .bind(draft.user_id)
            .bind(draft.log_date)
            .bind(&draft.description)
            .bind(draft.hours_worked)
            .fetch_one(pool)
            .await
    }

    /// Logs for a project, newest day first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<WorkLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_logs w JOIN users u ON u.id = w.user_id
             WHERE w.project_id = $1
             ORDER BY w.log_date DESC, w.created_at DESC"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Logs for a project in ascending date order, as the dashboard reads them.
    pub async fn list_by_project_chronological(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<WorkLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_logs w JOIN users u ON u.id = w.user_id
             WHERE w.project_id = $1
             ORDER BY w.log_date ASC, w.id ASC"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
