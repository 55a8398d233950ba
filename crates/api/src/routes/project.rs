//! Route definitions for the `/projects` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, feedback, project, work_log};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /timeline                  -> timeline
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/submit               -> submit
/// GET    /{id}/dashboard            -> get_dashboard
/// GET    /{id}/work-logs            -> list_by_project
/// POST   /{id}/work-logs            -> create
/// POST   /{id}/feedback-requests    -> request_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/timeline", get(project::timeline))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/submit", post(project::submit))
        .route("/{id}/dashboard", get(dashboard::get_dashboard))
        .route(
            "/{id}/work-logs",
            get(work_log::list_by_project).post(work_log::create),
        )
        .route("/{id}/feedback-requests", post(feedback::request_feedback))
}
