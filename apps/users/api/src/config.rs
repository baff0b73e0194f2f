use core_config::{AppInfo, Environment, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

/// Everything the binary reads from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/users")),
                ("APP_ENV", None),
                ("HOST", None),
                ("PORT", None),
                ("DB_SQLX_LOGGING", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "users_api");
                assert_eq!(config.server.address(), "0.0.0.0:8080");
                assert_eq!(config.database.url, "postgres://localhost/users");
                assert!(config.database.sqlx_logging);
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_from_env_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_from_env_port_override() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/users")),
                ("PORT", Some("9090")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 9090);
                assert!(config.environment.is_production());
            },
        );
    }
}
