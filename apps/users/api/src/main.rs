use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible, so startup errors are rendered with span traces
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .wrap_err("PostgreSQL connection failed")?;

    domain_users::postgres::create_schema(&db)
        .await
        .wrap_err("failed to create users schema")?;

    let state = AppState { config, db };

    let api_routes = api::routes(&state);

    let app = create_router::<openapi::ApiDoc>(api_routes)
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting users API (30s shutdown timeout)"
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection closed"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .wrap_err("server error")?;

    info!("Users API shutdown complete");
    Ok(())
}
