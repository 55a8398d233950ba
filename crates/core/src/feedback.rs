//! One-time client feedback tokens.
//!
//! A token is issued when the project owner requests feedback and is
//! consumed by the first successful submission through it. The token value
//! is a random UUID v4 and is the only credential the client needs, so it
//! must never be derived from the project id or the clock.
//!
//! Issuing a new token does not revoke older outstanding ones for the same
//! project; every link that has not been used stays valid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::notification::NotificationError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on the client feedback text.
pub const MAX_FEEDBACK_LENGTH: u64 = 5000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Token lifecycle. `Issued -> Used` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    Issued,
    Used,
}

impl TokenState {
    pub fn from_used(used: bool) -> Self {
        if used {
            TokenState::Used
        } else {
            TokenState::Issued
        }
    }

    pub fn is_redeemable(self) -> bool {
        self == TokenState::Issued
    }
}

/// What the client submits through the token-gated form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackPayload {
    #[validate(length(min = 1, max = MAX_FEEDBACK_LENGTH))]
    pub feedback: String,
    #[serde(default)]
    pub confirmed_completed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Client email is not set for this project")]
    MissingClientEmail,

    #[error("Feedback link not found")]
    TokenNotFound,

    #[error("This feedback link has already been used")]
    TokenAlreadyUsed,

    #[error("Invalid feedback: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

// ---------------------------------------------------------------------------
// Issuing
// ---------------------------------------------------------------------------

/// Fresh, unguessable token value.
pub fn generate_token() -> Uuid {
    Uuid::new_v4()
}

/// Return the client email if feedback can be requested at all.
pub fn require_client_email(client_email: Option<&str>) -> Result<&str, FeedbackError> {
    match client_email.map(str::trim) {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(FeedbackError::MissingClientEmail),
    }
}

/// Public URL the client follows to leave feedback.
pub fn feedback_url(public_base_url: &str, token: Uuid) -> String {
    format!("{}/feedback/{token}", public_base_url.trim_end_matches('/'))
}

/// Subject and body of the feedback request email.
pub fn feedback_request_message(project_name: &str, url: &str) -> (String, String) {
    (
        format!("Feedback request for project: {project_name}"),
        format!("Please provide feedback here: {url}"),
    )
}

// ---------------------------------------------------------------------------
// Redeeming
// ---------------------------------------------------------------------------

/// Validate a submission and return it with trimmed feedback text.
pub fn validate_payload(payload: FeedbackPayload) -> Result<FeedbackPayload, FeedbackError> {
    let payload = FeedbackPayload {
        feedback: payload.feedback.trim().to_string(),
        confirmed_completed: payload.confirmed_completed,
    };
    payload.validate().map_err(|_| {
        FeedbackError::InvalidPayload(format!(
            "feedback must be between 1 and {MAX_FEEDBACK_LENGTH} characters"
        ))
    })?;
    Ok(payload)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn payload(text: &str) -> FeedbackPayload {
        FeedbackPayload {
            feedback: text.to_string(),
            confirmed_completed: true,
        }
    }

    #[test]
    fn tokens_are_random_v4() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn missing_or_blank_email_is_rejected() {
        assert_matches!(
            require_client_email(None),
            Err(FeedbackError::MissingClientEmail)
        );
        assert_matches!(
            require_client_email(Some("  ")),
            Err(FeedbackError::MissingClientEmail)
        );
        assert_eq!(
            require_client_email(Some(" client@example.com ")).unwrap(),
            "client@example.com"
        );
    }

    #[test]
    fn url_embeds_token_without_double_slash() {
        let token = generate_token();
        let url = feedback_url("https://tracker.example.com/", token);
        assert_eq!(url, format!("https://tracker.example.com/feedback/{token}"));
    }

    #[test]
    fn message_mentions_project_and_url() {
        let (subject, body) = feedback_request_message("Substation 4", "https://x/feedback/1");
        assert_eq!(subject, "Feedback request for project: Substation 4");
        assert!(body.contains("https://x/feedback/1"));
    }

    #[test]
    fn token_state_transitions() {
        assert!(TokenState::from_used(false).is_redeemable());
        assert!(!TokenState::from_used(true).is_redeemable());
    }

    #[test]
    fn payload_is_trimmed() {
        let p = validate_payload(payload("  great work  ")).unwrap();
        assert_eq!(p.feedback, "great work");
        assert!(p.confirmed_completed);
    }

    #[test]
    fn blank_payload_is_rejected() {
        assert_matches!(
            validate_payload(payload("   ")),
            Err(FeedbackError::InvalidPayload(_))
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let long = "x".repeat(MAX_FEEDBACK_LENGTH as usize + 1);
        assert_matches!(
            validate_payload(payload(&long)),
            Err(FeedbackError::InvalidPayload(_))
        );
    }
}
