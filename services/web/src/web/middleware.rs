//! services/web/src/web/middleware.rs
//!
//! The session guard protecting the dashboard routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use house_numbers_core::flows;
use std::sync::Arc;
use tracing::debug;

use crate::web::{cookies::cookie_header, state::AppState, LANDING_PATH};

/// Middleware that resolves the caller's identity through the auth service.
///
/// If an identity resolves, it is inserted into request extensions for handlers to use.
/// Otherwise the browser is sent back to the landing page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let cookie = cookie_header(req.headers());

    match flows::resolve_identity(state.auth.as_ref(), cookie.as_deref()).await {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => {
            debug!("No identity for {}, redirecting to landing", req.uri().path());
            Redirect::to(LANDING_PATH).into_response()
        }
    }
}
