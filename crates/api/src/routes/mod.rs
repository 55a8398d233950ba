pub mod feedback;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects                                 list, create
/// /projects/timeline                        effort per visible project
/// /projects/{id}                            get, update, delete
/// /projects/{id}/submit                     one-way submit (POST)
/// /projects/{id}/dashboard                  dashboard snapshot
/// /projects/{id}/work-logs                  list, create
/// /projects/{id}/feedback-requests          email a feedback link (POST)
///
/// /feedback/{token}                         status, redeem (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/feedback", feedback::router())
}
