//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument.

pub mod feedback_token_repo;
pub mod project_repo;
pub mod user_repo;
pub mod work_log_repo;

pub use feedback_token_repo::{FeedbackTokenRepo, RedeemOutcome};
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
pub use work_log_repo::WorkLogRepo;
