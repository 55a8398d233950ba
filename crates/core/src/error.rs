#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Generic denial message. Never mentions whether the target exists.
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action";

impl CoreError {
    /// The single, generic authorization failure.
    pub fn permission_denied() -> Self {
        CoreError::Forbidden(PERMISSION_DENIED.to_string())
    }
}
