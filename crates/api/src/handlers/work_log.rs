//! Handlers for `/projects/{id}/work-logs`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use worktrack_core::access::Action;
use worktrack_core::types::DbId;
use worktrack_core::worklog::{
    validate_work_log, WorkLogContext, WorkLogInput, WORK_LOG_UNIQUE_CONSTRAINT,
};
use worktrack_db::models::work_log::WorkLog;
use worktrack_db::repositories::WorkLogRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::authorized_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/work-logs
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WorkLog>>>> {
    authorized_project(&state, &user, Action::ViewProject, project_id).await?;
    let logs = WorkLogRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// POST /api/v1/projects/{id}/work-logs
///
/// The pre-check catches the common duplicate; the unique index catches the
/// one that slips through between check and insert.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<WorkLogInput>,
) -> AppResult<(StatusCode, Json<DataResponse<WorkLog>>)> {
    authorized_project(&state, &user, Action::LogWork, project_id).await?;

    let existing_log_for_day =
        WorkLogRepo::exists_for_day(&state.pool, project_id, user.user_id, input.date).await?;
    let ctx = WorkLogContext {
        project_id,
        user_id: user.user_id,
        today: state.clock.today(),
        existing_log_for_day,
    };
    let draft = validate_work_log(&input, &ctx)?;

    let log = WorkLogRepo::create(&state.pool, &draft)
        .await
        .map_err(|e| {
            if worktrack_db::is_unique_violation(&e, WORK_LOG_UNIQUE_CONSTRAINT) {
                tracing::warn!(project_id, user_id = user.user_id, date = %draft.log_date, "Concurrent work log rejected");
                AppError::WorkLogConflict(format!(
                    "A work log for {} was recorded by another request",
                    draft.log_date
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        project_id,
        user_id = user.user_id,
        work_log_id = log.id,
        hours = log.hours_worked,
        "Work logged"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}
