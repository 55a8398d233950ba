//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use worktrack_core::access::{check_access, list_scope, Action};
use worktrack_core::dashboard::{summarize_timeline, ProjectEffort, TimelineEntry};
use worktrack_core::error::CoreError;
use worktrack_core::types::DbId;
use worktrack_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use worktrack_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a project and check that `user` may perform `action` on it.
///
/// A missing project is rejected exactly like a forbidden one.
pub(crate) async fn authorized_project(
    state: &AppState,
    user: &AuthUser,
    action: Action,
    id: DbId,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(CoreError::permission_denied)?;
    check_access(&user.actor(), action, Some(&project.target()))?;
    Ok(project)
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let actor = user.actor();
    check_access(&actor, Action::ListProjects, None)?;
    let projects = ProjectRepo::list(&state.pool, list_scope(&actor), &filter).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    check_access(&user.actor(), Action::CreateProject, None)?;
    input.validate()?;

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(project_id = project.id, user_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = authorized_project(&state, &user, Action::ViewProject, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    authorized_project(&state, &user, Action::UpdateProject, id).await?;
    input.validate()?;

    // `None` here means the project was submitted after the access check.
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(CoreError::permission_denied)?;
    tracing::info!(project_id = id, user_id = user.user_id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorized_project(&state, &user, Action::DeleteProject, id).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(CoreError::permission_denied().into());
    }
    tracing::info!(project_id = id, user_id = user.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    authorized_project(&state, &user, Action::SubmitProject, id).await?;

    let project = ProjectRepo::submit(&state.pool, id)
        .await?
        .ok_or_else(CoreError::permission_denied)?;
    tracing::info!(project_id = id, user_id = user.user_id, role = %user.role, "Project submitted");
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/timeline
pub async fn timeline(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TimelineEntry>>>> {
    let actor = user.actor();
    check_access(&actor, Action::ListProjects, None)?;

    let today = state.clock.today();
    let rows = ProjectRepo::effort_summary(&state.pool, list_scope(&actor)).await?;
    let entries = rows
        .iter()
        .map(|row| summarize_timeline(&ProjectEffort::from(row), today))
        .collect();
    Ok(Json(DataResponse { data: entries }))
}
