//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from a JWT Bearer token.
//!
//! Role and ownership checks are not extractors: they need the target
//! project, so handlers call `worktrack_core::access::check_access` after
//! loading it.

pub mod auth;
