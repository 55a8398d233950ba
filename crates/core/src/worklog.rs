//! Work-log integrity guard.
//!
//! [`validate_work_log`] is a pure function: the caller passes the project,
//! the user, today's date and whether a log already exists for that day.
//! Persistence must still enforce uniqueness atomically (see
//! [`WORK_LOG_UNIQUE_CONSTRAINT`]) because two requests can both pass the
//! pre-check before either inserts.

use serde::{Deserialize, Serialize};

use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest loggable amount of work, in hours.
pub const MIN_HOURS: f64 = 0.5;

/// Largest loggable amount of work, in hours.
pub const MAX_HOURS: f64 = 24.0;

/// Hours must be a multiple of this step.
pub const HOURS_STEP: f64 = 0.5;

/// Name of the unique index on `(project_id, user_id, log_date)`.
///
/// Must match the migration that creates `work_logs`.
pub const WORK_LOG_UNIQUE_CONSTRAINT: &str = "uq_work_logs_project_user_date";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw fields of a work-log submission.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkLogInput {
    pub date: Day,
    pub description: String,
    pub hours_worked: f64,
}

/// Everything the guard needs besides the submission itself.
#[derive(Debug, Clone, Copy)]
pub struct WorkLogContext {
    pub project_id: DbId,
    pub user_id: DbId,
    pub today: Day,
    /// Whether `(project_id, user_id, date)` already has a log.
    /// Only meaningful for new entries.
    pub existing_log_for_day: bool,
}

/// A validated work log, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkLogDraft {
    pub project_id: DbId,
    pub user_id: DbId,
    pub log_date: Day,
    pub description: String,
    pub hours_worked: f64,
}

/// Why a submission was rejected. Each variant names the offending field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkLogError {
    #[error("You cannot log work for future dates ({date} is after {today})")]
    FutureDate { date: Day, today: Day },

    #[error(
        "You have already logged work for this project on {date}. \
         Edit the existing log or choose a different date"
    )]
    Duplicate { date: Day },

    #[error("Hours worked must be between {MIN_HOURS} and {MAX_HOURS}, got {hours}")]
    HoursOutOfRange { hours: f64 },

    #[error("Hours worked must be a multiple of {HOURS_STEP}, got {hours}")]
    HoursNotHalfStep { hours: f64 },

    #[error("Work description must not be empty")]
    EmptyDescription,
}

impl WorkLogError {
    /// The submission field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            WorkLogError::FutureDate { .. } | WorkLogError::Duplicate { .. } => "date",
            WorkLogError::HoursOutOfRange { .. } | WorkLogError::HoursNotHalfStep { .. } => {
                "hours_worked"
            }
            WorkLogError::EmptyDescription => "description",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a new work-log submission.
///
/// Checks run in field order (date, hours, description) and the first
/// failure is returned.
pub fn validate_work_log(
    input: &WorkLogInput,
    ctx: &WorkLogContext,
) -> Result<WorkLogDraft, WorkLogError> {
    if input.date > ctx.today {
        return Err(WorkLogError::FutureDate {
            date: input.date,
            today: ctx.today,
        });
    }
    if ctx.existing_log_for_day {
        return Err(WorkLogError::Duplicate { date: input.date });
    }

    validate_hours(input.hours_worked)?;

    let description = input.description.trim();
    if description.is_empty() {
        return Err(WorkLogError::EmptyDescription);
    }

    Ok(WorkLogDraft {
        project_id: ctx.project_id,
        user_id: ctx.user_id,
        log_date: input.date,
        description: description.to_string(),
        hours_worked: input.hours_worked,
    })
}

/// Check the hours range and the half-hour step.
pub fn validate_hours(hours: f64) -> Result<(), WorkLogError> {
    // NaN fails the containment check too.
    if !(MIN_HOURS..=MAX_HOURS).contains(&hours) {
        return Err(WorkLogError::HoursOutOfRange { hours });
    }
    if (hours / HOURS_STEP).fract() != 0.0 {
        return Err(WorkLogError::HoursNotHalfStep { hours });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
