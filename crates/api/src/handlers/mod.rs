//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers authorize through `worktrack_core::access`, delegate to the
//! repositories in `worktrack_db` and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod dashboard;
pub mod feedback;
pub mod project;
pub mod work_log;
