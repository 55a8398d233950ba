//! Repository for the `projects` table.

use sqlx::PgPool;
use worktrack_core::access::ProjectScope;
use worktrack_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectEffortRow, ProjectFilter, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, category, tender_award_date, completion_date, \
                       company, location, description, is_submitted, submission_date, \
                       client_email, client_feedback, client_confirmed_completed, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new draft project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (owner_id, name, category, tender_award_date, completion_date,
                 company, location, description, client_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.tender_award_date)
            .bind(input.completion_date)
            .bind(&input.company)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.client_email)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects visible in `scope`, newest first, narrowed by `filter`.
    pub async fn list(
        pool: &PgPool,
        scope: ProjectScope,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let owner_id = match scope {
            ProjectScope::All => None,
            ProjectScope::OwnedBy(id) => Some(id),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::BIGINT IS NULL OR owner_id = $1)
               AND ($2::TEXT IS NULL OR strpos(lower(name), lower($2)) > 0)
               AND ($3::TEXT IS NULL OR strpos(lower(category), lower($3)) > 0)
               AND ($4::TEXT IS NULL OR strpos(lower(company), lower($4)) > 0)
               AND ($5::BOOLEAN IS NULL OR is_submitted = $5)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&filter.name)
            .bind(&filter.category)
            .bind(&filter.company)
            .bind(filter.is_submitted)
            .fetch_all(pool)
            .await
    }

    /// Update a draft project. Only non-`None` fields in `input` are applied.
    ///
    /// `completion_date` and `client_email` use `Option<Option<T>>`: an outer
    /// `Some(None)` clears the column.
    ///
    /// Returns `None` if the project does not exist or is already submitted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let completion_date_provided = input.completion_date.is_some();
        let completion_date_value = input.completion_date.flatten();
        let client_email_provided = input.client_email.is_some();
        let client_email_value = input.client_email.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                tender_award_date = COALESCE($4, tender_award_date),
                completion_date = CASE WHEN $5 THEN $6 ELSE completion_date END,
                company = COALESCE($7, company),
                location = COALESCE($8, location),
                description = COALESCE($9, description),
                client_email = CASE WHEN $10 THEN $11 ELSE client_email END
             WHERE id = $1 AND is_submitted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.tender_award_date)
            .bind(completion_date_provided)
            .bind(completion_date_value)
            .bind(&input.company)
            .bind(&input.location)
            .bind(&input.description)
            .bind(client_email_provided)
            .bind(client_email_value)
            .fetch_optional(pool)
            .await
    }

    /// Mark a draft project as submitted and stamp the submission time.
    ///
    /// One-way: returns `None` if the project is missing or already submitted.
    pub async fn submit(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET is_submitted = true, submission_date = NOW()
             WHERE id = $1 AND is_submitted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project. Work logs and feedback tokens cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total hours and distinct active days per project visible in `scope`,
    /// oldest project first.
    pub async fn effort_summary(
        pool: &PgPool,
        scope: ProjectScope,
    ) -> Result<Vec<ProjectEffortRow>, sqlx::Error> {
        let owner_id = match scope {
            ProjectScope::All => None,
            ProjectScope::OwnedBy(id) => Some(id),
        };
        sqlx::query_as::<_, ProjectEffortRow>(
            "SELECT p.id, p.owner_id, p.name, p.completion_date, p.is_submitted,
                    COALESCE(SUM(w.hours_worked), 0)::DOUBLE PRECISION AS total_hours,
                    COUNT(DISTINCT w.log_date) AS active_days
             FROM projects p
             LEFT JOIN work_logs w ON w.project_id = p.id
             WHERE ($1::BIGINT IS NULL OR p.owner_id = $1)
             GROUP BY p.id
             ORDER BY p.created_at ASC, p.id ASC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }
}
