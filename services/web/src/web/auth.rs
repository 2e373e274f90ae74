//! services/web/src/web/auth.rs
//!
//! The landing page and the login action.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use askama::Template;
use chrono::Utc;
use house_numbers_core::flows;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::error::WebError;
use crate::web::{cookies, pages::LandingPage, state::AppState, DASHBOARD_PATH};

//=========================================================================================
// Request Types
//=========================================================================================

/// Missing fields decode as empty and fail validation like any other bad input.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET / - Login page, or straight to the dashboard when already signed in
pub async fn landing_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let cookie = cookies::cookie_header(&headers);
    if flows::resolve_identity(state.auth.as_ref(), cookie.as_deref())
        .await
        .is_some()
    {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let page = LandingPage {
        email: String::new(),
        error: None,
    };
    Ok(Html(page.render()?).into_response())
}

/// POST / - Login with email and password
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match flows::login(state.auth.as_ref(), &form.email, &form.password, Utc::now()).await {
        Ok(session) => {
            let cookie = cookies::set_session(&session, state.config.cookie_secure);
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(DASHBOARD_PATH)).into_response())
        }
        Err(e) => {
            warn!("Login rejected: {}", e);
            let page = LandingPage {
                email: form.email.trim().to_string(),
                error: Some(e.to_string()),
            };
            Ok(Html(page.render()?).into_response())
        }
    }
}
