//! Project entity model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;
use worktrack_core::access::{ProjectState, ProjectTarget};
use worktrack_core::dashboard::ProjectEffort;
use worktrack_core::types::{Day, DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub category: String,
    pub tender_award_date: Day,
    pub completion_date: Option<Day>,
    pub company: String,
    pub location: String,
    pub description: String,
    pub is_submitted: bool,
    pub submission_date: Option<Timestamp>,
    pub client_email: Option<String>,
    pub client_feedback: Option<String>,
    pub client_confirmed_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    pub fn state(&self) -> ProjectState {
        ProjectState::from_submitted(self.is_submitted)
    }

    /// The facts the access policy needs about this project.
    pub fn target(&self) -> ProjectTarget {
        ProjectTarget {
            owner_id: self.owner_id,
            state: self.state(),
        }
    }
}

/// DTO for creating a new project. The owner comes from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub tender_award_date: Day,
    pub completion_date: Option<Day>,
    #[validate(length(min = 1, max = 255))]
    pub company: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(email)]
    pub client_email: Option<String>,
}

/// DTO for updating a draft project. All fields are optional.
///
/// `completion_date` and `client_email` use `Option<Option<T>>` so an
/// explicit `null` clears the value while an absent key keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub tender_award_date: Option<Day>,
    #[serde(default, deserialize_with = "nullable")]
    pub completion_date: Option<Option<Day>>,
    #[validate(length(min = 1, max = 255))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email)]
    pub client_email: Option<Option<String>>,
}

/// A present key (even `null`) becomes `Some(_)`; `default` covers absence.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Optional list filters (`?name=&category=&company=&is_submitted=`).
///
/// Text filters are case-insensitive literal substring matches; `%` and `_`
/// carry no wildcard meaning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub is_submitted: Option<bool>,
}

/// Per-project effort summary for the timeline view.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectEffortRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub completion_date: Option<Day>,
    pub is_submitted: bool,
    pub total_hours: f64,
    pub active_days: i64,
}

impl From<&ProjectEffortRow> for ProjectEffort {
    fn from(row: &ProjectEffortRow) -> Self {
        ProjectEffort {
            project_id: row.id,
            name: row.name.clone(),
            completion_date: row.completion_date,
            is_submitted: row.is_submitted,
            total_hours: row.total_hours,
            active_days: usize::try_from(row.active_days).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let absent: UpdateProject = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert!(absent.completion_date.is_none());
        assert!(absent.client_email.is_none());

        let cleared: UpdateProject =
            serde_json::from_str(r#"{"completion_date": null, "client_email": null}"#).unwrap();
        assert_eq!(cleared.completion_date, Some(None));
        assert_eq!(cleared.client_email, Some(None));

        let set: UpdateProject =
            serde_json::from_str(r#"{"completion_date": "2024-09-01"}"#).unwrap();
        assert_eq!(set.completion_date, Some(Day::from_ymd_opt(2024, 9, 1)));
    }
}
