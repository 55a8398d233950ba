//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use worktrack_core::access::Role;
use worktrack_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Role name as stored (`"employee"` or `"director"`).
    pub role: String,
    pub created_at: Timestamp,
}

impl User {
    /// Parsed role. The CHECK constraint keeps stored values valid.
    pub fn role(&self) -> Result<Role, String> {
        self.role.parse()
    }
}

/// DTO for provisioning a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role: Role,
}
