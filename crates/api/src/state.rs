use std::sync::Arc;

use worktrack_core::clock::Clock;
use worktrack_core::notification::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: worktrack_db::DbPool,
    /// Server configuration (JWT settings, public base URL).
    pub config: Arc<ServerConfig>,
    /// Outbound channel for client feedback requests.
    pub notifier: Arc<dyn Notifier>,
    /// Source of "today" for date validation and dashboards.
    pub clock: Arc<dyn Clock>,
}
