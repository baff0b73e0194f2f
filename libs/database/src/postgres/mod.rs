//! SeaORM connection and health helpers.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{DatabaseConnection, DbErr};
