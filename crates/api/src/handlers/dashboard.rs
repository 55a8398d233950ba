//! Handler for the per-project dashboard.

use axum::extract::{Path, State};
use axum::Json;
use worktrack_core::access::Action;
use worktrack_core::dashboard::{compute_dashboard, DashboardSnapshot, LoggedHours};
use worktrack_core::types::DbId;
use worktrack_db::repositories::WorkLogRepo;

use crate::error::AppResult;
use crate::handlers::project::authorized_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DashboardSnapshot>>> {
    let project = authorized_project(&state, &user, Action::ViewDashboard, project_id).await?;

    let logs = WorkLogRepo::list_by_project_chronological(&state.pool, project_id).await?;
    let logs: Vec<LoggedHours> = logs.iter().map(LoggedHours::from).collect();

    let snapshot = compute_dashboard(project.completion_date, &logs, state.clock.today());
    Ok(Json(DataResponse { data: snapshot }))
}
