//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the API accepts them

pub mod feedback_token;
pub mod project;
pub mod user;
pub mod work_log;
