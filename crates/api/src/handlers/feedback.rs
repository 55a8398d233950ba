//! Client feedback: issuing links (owner) and redeeming them (public).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;
use worktrack_core::access::Action;
use worktrack_core::feedback::{
    feedback_request_message, feedback_url, generate_token, require_client_email,
    validate_payload, FeedbackError, FeedbackPayload,
};
use worktrack_core::types::DbId;
use worktrack_db::repositories::{FeedbackTokenRepo, RedeemOutcome};

use crate::error::AppResult;
use crate::handlers::project::authorized_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgement returned to the owner. The token itself is only ever
/// sent to the client.
#[derive(Debug, Serialize)]
pub struct FeedbackRequestSent {
    pub project_id: DbId,
    pub recipient: String,
}

/// What the public feedback page needs before showing the form.
#[derive(Debug, Serialize)]
pub struct FeedbackLinkStatus {
    pub project_name: String,
    pub redeemable: bool,
}

/// Redemption acknowledgement. Carries no project details.
#[derive(Debug, Serialize)]
pub struct FeedbackAccepted {
    pub accepted: bool,
}

/// Unparseable tokens are answered exactly like unknown ones.
fn parse_token(raw: &str) -> Result<Uuid, FeedbackError> {
    Uuid::parse_str(raw).map_err(|_| FeedbackError::TokenNotFound)
}

/// POST /api/v1/projects/{id}/feedback-requests
///
/// The token row is committed only after the email went out; a failed send
/// drops the transaction and leaves nothing behind.
pub async fn request_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<FeedbackRequestSent>>)> {
    let project = authorized_project(&state, &user, Action::RequestFeedback, project_id).await?;
    let recipient = require_client_email(project.client_email.as_deref())?.to_string();

    // The connection is held across the send. A commit failing after a
    // delivered email leaves the client with a dead link; that is accepted.
    let mut tx = state.pool.begin().await?;
    let token = FeedbackTokenRepo::create(&mut tx, project_id, generate_token()).await?;

    let url = feedback_url(&state.config.public_base_url, token.token);
    let (subject, body) = feedback_request_message(&project.name, &url);
    state
        .notifier
        .send(&recipient, &subject, &body)
        .await
        .map_err(FeedbackError::from)?;

    tx.commit().await?;
    tracing::info!(project_id, user_id = user.user_id, "Feedback request sent");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FeedbackRequestSent {
                project_id,
                recipient,
            },
        }),
    ))
}

/// GET /api/v1/feedback/{token}
pub async fn token_status(
    State(state): State<AppState>,
    Path(raw_token): Path<String>,
) -> AppResult<Json<DataResponse<FeedbackLinkStatus>>> {
    let token = parse_token(&raw_token)?;
    let status = FeedbackTokenRepo::status(&state.pool, token)
        .await?
        .ok_or(FeedbackError::TokenNotFound)?;
    if !status.state().is_redeemable() {
        return Err(FeedbackError::TokenAlreadyUsed.into());
    }

    Ok(Json(DataResponse {
        data: FeedbackLinkStatus {
            project_name: status.project_name,
            redeemable: true,
        },
    }))
}

/// POST /api/v1/feedback/{token}
pub async fn redeem(
    State(state): State<AppState>,
    Path(raw_token): Path<String>,
    Json(payload): Json<FeedbackPayload>,
) -> AppResult<Json<DataResponse<FeedbackAccepted>>> {
    let token = parse_token(&raw_token)?;
    let payload = validate_payload(payload)?;

    match FeedbackTokenRepo::redeem(&state.pool, token, &payload).await? {
        RedeemOutcome::Redeemed { project_id } => {
            tracing::info!(
                project_id,
                confirmed_completed = payload.confirmed_completed,
                "Client feedback recorded"
            );
            Ok(Json(DataResponse {
                data: FeedbackAccepted { accepted: true },
            }))
        }
        RedeemOutcome::NotFound => Err(FeedbackError::TokenNotFound.into()),
        RedeemOutcome::AlreadyUsed => Err(FeedbackError::TokenAlreadyUsed.into()),
    }
}
