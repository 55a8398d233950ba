//! Feedback token entity model.

use sqlx::FromRow;
use uuid::Uuid;
use worktrack_core::feedback::TokenState;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `feedback_tokens` table.
///
/// Not `Serialize`: the token value only ever leaves the server by email.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackToken {
    pub id: DbId,
    pub project_id: DbId,
    pub token: Uuid,
    pub used: bool,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Public view of a token: whether it can still be redeemed, and for which
/// project.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackTokenStatus {
    pub project_name: String,
    pub used: bool,
}

impl FeedbackTokenStatus {
    pub fn state(&self) -> TokenState {
        TokenState::from_used(self.used)
    }
}
