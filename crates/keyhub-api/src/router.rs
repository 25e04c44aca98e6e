//! Route definitions for the KeyHub HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(client_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Endpoints called by deployed client software.
fn client_routes() -> Router<AppState> {
    Router::new().route("/activate", post(handlers::activate::activate))
}

/// Operator endpoints, guarded by the admin password.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/licenses",
            post(handlers::admin::issue_licenses).get(handlers::admin::list_licenses),
        )
        .route("/admin/licenses/stats", get(handlers::admin::license_stats))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
