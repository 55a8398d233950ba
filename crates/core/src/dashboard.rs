//! Project dashboard aggregation.
//!
//! [`compute_dashboard`] derives totals, trends, per-user workload and idle
//! gaps from a project's work logs. It is computed on demand from whatever
//! rows the caller loaded; nothing is cached or persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One work-log row as seen by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedHours {
    pub user_id: DbId,
    pub username: String,
    pub date: Day,
    pub hours: f64,
}

/// Summed hours for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWorkload {
    pub user_id: DbId,
    pub username: String,
    pub total_hours: f64,
}

/// Summed hours for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: Day,
    pub total: f64,
}

/// Running total up to and including `date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub date: Day,
    pub cumulative: f64,
}

/// A maximal run of days with no logged work between two logged days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdleGap {
    pub from: Day,
    pub to: Day,
    pub days: i64,
}

/// Aggregated effort for one project, as loaded for the timeline view.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEffort {
    pub project_id: DbId,
    pub name: String,
    pub completion_date: Option<Day>,
    pub is_submitted: bool,
    pub total_hours: f64,
    pub active_days: usize,
}

/// One row of the projects timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub project_id: DbId,
    pub name: String,
    pub is_submitted: bool,
    pub completion_date: Option<Day>,
    pub total_hours: f64,
    pub active_days: usize,
    pub avg_daily_hours: f64,
    pub days_left: Option<i64>,
}

/// Everything the project dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_hours: f64,
    pub active_days: usize,
    /// Rounded to one decimal place.
    pub avg_daily_hours: f64,
    /// One entry per distinct user, ordered by user id.
    pub workload_by_user: Vec<UserWorkload>,
    /// Ascending by date.
    pub daily_trend: Vec<DailyTotal>,
    pub cumulative: Vec<CumulativePoint>,
    pub idle_days: Vec<IdleGap>,
    /// Negative when overdue; `None` without a completion date.
    pub days_left: Option<i64>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the dashboard for one project.
///
/// `logs` may arrive in any order. An empty slice yields zeros and empty
/// collections, never an error.
pub fn compute_dashboard(
    completion_date: Option<Day>,
    logs: &[LoggedHours],
    today: Day,
) -> DashboardSnapshot {
    let mut per_day: BTreeMap<Day, f64> = BTreeMap::new();
    let mut per_user: BTreeMap<DbId, UserWorkload> = BTreeMap::new();

    for log in logs {
        *per_day.entry(log.date).or_insert(0.0) += log.hours;
        per_user
            .entry(log.user_id)
            .or_insert_with(|| UserWorkload {
                user_id: log.user_id,
                username: log.username.clone(),
                total_hours: 0.0,
            })
            .total_hours += log.hours;
    }

    let daily_trend: Vec<DailyTotal> = per_day
        .iter()
        .map(|(&date, &total)| DailyTotal { date, total })
        .collect();

    let cumulative = running_totals(&daily_trend);
    let dates: Vec<Day> = per_day.keys().copied().collect();
    let idle_days = idle_gaps(&dates);

    let total_hours: f64 = daily_trend.iter().map(|d| d.total).sum();
    let active_days = daily_trend.len();

    DashboardSnapshot {
        total_hours,
        active_days,
        avg_daily_hours: average_per_day(total_hours, active_days),
        workload_by_user: per_user.into_values().collect(),
        daily_trend,
        cumulative,
        idle_days,
        days_left: days_left(completion_date, today),
    }
}

/// Condense a project's effort into its timeline row.
pub fn summarize_timeline(effort: &ProjectEffort, today: Day) -> TimelineEntry {
    TimelineEntry {
        project_id: effort.project_id,
        name: effort.name.clone(),
        is_submitted: effort.is_submitted,
        completion_date: effort.completion_date,
        total_hours: effort.total_hours,
        active_days: effort.active_days,
        avg_daily_hours: average_per_day(effort.total_hours, effort.active_days),
        days_left: days_left(effort.completion_date, today),
    }
}

/// `total / days` rounded to one decimal, or 0 when there are no days.
pub fn average_per_day(total_hours: f64, active_days: usize) -> f64 {
    if active_days == 0 {
        return 0.0;
    }
    round_one_decimal(total_hours / active_days as f64)
}

/// Days from `today` until `completion_date`. Not clamped.
pub fn days_left(completion_date: Option<Day>, today: Day) -> Option<i64> {
    completion_date.map(|c| (c - today).num_days())
}

/// Running sum over an ordered daily trend.
pub fn running_totals(daily_trend: &[DailyTotal]) -> Vec<CumulativePoint> {
    let mut running = 0.0;
    daily_trend
        .iter()
        .map(|d| {
            running += d.total;
            CumulativePoint {
                date: d.date,
                cumulative: running,
            }
        })
        .collect()
}

/// Gaps between adjacent dates of a sorted, de-duplicated date list.
pub fn idle_gaps(dates: &[Day]) -> Vec<IdleGap> {
    dates
        .windows(2)
        .filter_map(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            let days = (next - prev).num_days() - 1;
            (days > 0).then(|| IdleGap {
                from: prev + chrono::Duration::days(1),
                to: next - chrono::Duration::days(1),
                days,
            })
        })
        .collect()
}

/// Half-to-even, as decimal hour totals are rounded for display.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
