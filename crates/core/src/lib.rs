//! Worktrack domain logic.
//!
//! Everything in this crate is free of database and HTTP dependencies:
//! callers load rows, pass them in, and persist whatever comes back.
//!
//! - [`worklog`] -- work-log integrity guard.
//! - [`dashboard`] -- per-project analytics over a work-log set.
//! - [`feedback`] -- one-time client feedback token rules.
//! - [`access`] -- role/action capability table and project state gating.
//! - [`clock`] -- injectable source of "today".
//! - [`notification`] -- outbound notifier trait.

pub mod access;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod notification;
pub mod types;
pub mod worklog;
