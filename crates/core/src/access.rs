//! Role-gated access policy.
//!
//! Decisions are a pure function of the actor's role, the requested
//! [`Action`], and the actor's relation to the target project. A second
//! static table gates actions on the project's lifecycle state, so a
//! submitted project becomes read-only without any per-field bookkeeping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Role names
// ---------------------------------------------------------------------------

/// These must match the CHECK constraint on `users.role`.
pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_DIRECTOR: &str = "director";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The two fixed roles. No hierarchy, no inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Director,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => ROLE_EMPLOYEE,
            Role::Director => ROLE_DIRECTOR,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_EMPLOYEE => Ok(Role::Employee),
            ROLE_DIRECTOR => Ok(Role::Director),
            other => Err(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_EMPLOYEE}, {ROLE_DIRECTOR}"
            )),
        }
    }
}

/// Every operation that goes through the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ListProjects,
    ViewProject,
    CreateProject,
    UpdateProject,
    SubmitProject,
    DeleteProject,
    LogWork,
    ViewDashboard,
    RequestFeedback,
}

/// How the actor relates to the project the action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    NotOwner,
    /// The action has no target project (list, create).
    NoTarget,
}

/// Lifecycle of a project. `Draft -> Submitted` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Draft,
    Submitted,
}

impl ProjectState {
    pub fn from_submitted(is_submitted: bool) -> Self {
        if is_submitted {
            ProjectState::Submitted
        } else {
            ProjectState::Draft
        }
    }
}

/// The authenticated caller, as supplied by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: Role,
}

/// The facts about a project that access decisions need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTarget {
    pub owner_id: DbId,
    pub state: ProjectState,
}

/// Which projects a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    All,
    OwnedBy(DbId),
}

// ---------------------------------------------------------------------------
// Capability tables
// ---------------------------------------------------------------------------

/// Decide whether `role` may perform `action` given its `ownership` of the
/// target.
pub fn authorize(role: Role, action: Action, ownership: Ownership) -> bool {
    use Action::*;

    match role {
        Role::Director => match action {
            ListProjects | ViewProject | ViewDashboard => true,
            // Overseer status change on any project.
            SubmitProject => ownership != Ownership::NoTarget,
            CreateProject | UpdateProject | DeleteProject | LogWork | RequestFeedback => false,
        },
        Role::Employee => match action {
            ListProjects | CreateProject => true,
            ViewProject | UpdateProject | SubmitProject | DeleteProject | LogWork
            | ViewDashboard | RequestFeedback => ownership == Ownership::Owner,
        },
    }
}

/// Whether `action` is allowed while the project is in `state`.
pub fn permitted_in_state(state: ProjectState, action: Action) -> bool {
    use Action::*;

    match state {
        ProjectState::Draft => true,
        ProjectState::Submitted => match action {
            ListProjects | ViewProject | ViewDashboard | RequestFeedback => true,
            CreateProject | UpdateProject | SubmitProject | DeleteProject | LogWork => false,
        },
    }
}

/// Combine the role table and the state table into a single decision.
///
/// Denials always carry the same generic message.
pub fn check_access(
    actor: &Actor,
    action: Action,
    target: Option<&ProjectTarget>,
) -> Result<(), CoreError> {
    let ownership = match target {
        None => Ownership::NoTarget,
        Some(t) if t.owner_id == actor.user_id => Ownership::Owner,
        Some(_) => Ownership::NotOwner,
    };

    if !authorize(actor.role, action, ownership) {
        return Err(CoreError::permission_denied());
    }
    if let Some(t) = target {
        if !permitted_in_state(t.state, action) {
            return Err(CoreError::permission_denied());
        }
    }
    Ok(())
}

/// Directors see every project; employees only their own.
pub fn list_scope(actor: &Actor) -> ProjectScope {
    match actor.role {
        Role::Director => ProjectScope::All,
        Role::Employee => ProjectScope::OwnedBy(actor.user_id),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
