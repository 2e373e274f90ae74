pub mod auth;
pub mod cookies;
pub mod dashboard;
pub mod middleware;
pub mod pages;
pub mod state;

pub use middleware::require_session;

use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use state::AppState;

/// The unauthenticated landing view (login page).
pub const LANDING_PATH: &str = "/";
/// The protected view.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Builds the complete application router.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route(
            LANDING_PATH,
            get(auth::landing_handler).post(auth::login_handler),
        )
        .route("/healthz", get(healthz));

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route(
            DASHBOARD_PATH,
            get(dashboard::dashboard_handler).post(dashboard::dashboard_action_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn healthz() -> &'static str {
    "ok"
}
