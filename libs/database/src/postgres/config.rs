use sea_orm::ConnectOptions;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Connection settings for PostgreSQL.
///
/// Pool sizing is left to SeaORM's defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    /// Log every statement through sqlx.
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sqlx_logging: true,
        }
    }

    pub fn with_sqlx_logging(mut self, enabled: bool) -> Self {
        self.sqlx_logging = enabled;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.sqlx_logging(self.sqlx_logging);
        opt
    }
}

/// Reads `DATABASE_URL` (required) and `DB_SQLX_LOGGING` (default `true`).
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;
        let sqlx_logging = env_parse_or("DB_SQLX_LOGGING", true)?;
        Ok(Self { url, sqlx_logging })
    }
}
