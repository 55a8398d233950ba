//! Public, token-gated feedback routes. No authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// GET    /{token}    -> token_status
/// POST   /{token}    -> redeem
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", get(feedback::token_status).post(feedback::redeem))
}
