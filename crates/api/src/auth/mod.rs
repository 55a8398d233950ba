//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Accounts and logins belong to the identity service; this crate only
//! verifies the tokens it issues.

pub mod jwt;
