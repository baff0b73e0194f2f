use axum::{Router, routing::get};

pub mod health;
pub mod users;

/// API routes with state already applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}

/// `/ready` with a real database check. Merge it next to `health_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
