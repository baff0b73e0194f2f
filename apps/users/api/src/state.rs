//! Shared application state.

use sea_orm::DatabaseConnection;

/// Cloned per router; clones share the same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
