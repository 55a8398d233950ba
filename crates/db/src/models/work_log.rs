//! Work log entity model.

use serde::Serialize;
use sqlx::FromRow;
use worktrack_core::dashboard::LoggedHours;
use worktrack_core::types::{Day, DbId, Timestamp};

/// A row from the `work_logs` table, joined with the author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkLog {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub log_date: Day,
    pub description: String,
    pub hours_worked: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&WorkLog> for LoggedHours {
    fn from(log: &WorkLog) -> Self {
        LoggedHours {
            user_id: log.user_id,
            username: log.username.clone(),
            date: log.log_date,
            hours: log.hours_worked,
        }
    }
}
