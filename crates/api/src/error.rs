use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use worktrack_core::error::CoreError;
use worktrack_core::feedback::FeedbackError;
use worktrack_core::worklog::WorkLogError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and the domain error enums, and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": msg, "code": CODE }`, plus a `"field"`
/// key when the error concerns a single input field.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `worktrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected work-log submission.
    #[error(transparent)]
    WorkLog(#[from] WorkLogError),

    /// Two concurrent submissions for the same project, user and day; the
    /// other one was stored first.
    #[error("Work log conflict: {0}")]
    WorkLogConflict(String),

    /// A feedback-token workflow failure.
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    /// Request body failed declarative validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, message and optional offending field.
type ErrorParts = (StatusCode, &'static str, String, Option<String>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::WorkLog(err) => classify_work_log_error(err),
            AppError::WorkLogConflict(msg) => (
                StatusCode::CONFLICT,
                "WORK_LOG_CONFLICT",
                msg.clone(),
                Some("date".to_string()),
            ),
            AppError::Feedback(err) => classify_feedback_error(err),
            AppError::Validation(errors) => {
                let field = first_invalid_field(errors);
                let message = match &field {
                    Some(f) => format!("Invalid value for field '{f}'"),
                    None => "Invalid request body".to_string(),
                };
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, field)
            }
            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(err);
                (status, code, message, None)
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> ErrorParts {
    match core {
        CoreError::Unauthorized(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
        }
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),
    }
}

fn classify_work_log_error(err: &WorkLogError) -> ErrorParts {
    let (status, code) = match err {
        WorkLogError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE_WORK_LOG"),
        _ => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
    };
    (status, code, err.to_string(), Some(err.field().to_string()))
}

fn classify_feedback_error(err: &FeedbackError) -> ErrorParts {
    match err {
        FeedbackError::MissingClientEmail => (
            StatusCode::BAD_REQUEST,
            "MISSING_CLIENT_EMAIL",
            err.to_string(),
            Some("client_email".to_string()),
        ),
        FeedbackError::TokenNotFound => {
            (StatusCode::NOT_FOUND, "TOKEN_NOT_FOUND", err.to_string(), None)
        }
        FeedbackError::TokenAlreadyUsed => {
            (StatusCode::GONE, "TOKEN_ALREADY_USED", err.to_string(), None)
        }
        FeedbackError::InvalidPayload(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            msg.clone(),
            Some("feedback".to_string()),
        ),
        FeedbackError::Notification(inner) => {
            tracing::error!(error = %inner, "Feedback notification failed");
            (
                StatusCode::BAD_GATEWAY,
                "NOTIFICATION_FAILED",
                "The feedback request email could not be sent".to_string(),
                None,
            )
        }
    }
}

/// Alphabetically first field with a declarative validation failure.
fn first_invalid_field(errors: &validator::ValidationErrors) -> Option<String> {
    errors.field_errors().keys().map(|k| k.to_string()).min()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
