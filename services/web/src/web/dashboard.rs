//! services/web/src/web/dashboard.rs
//!
//! The protected dashboard: entry submission and logout.
//!
//! Entries only live in the rendered page. Each dashboard form posts them
//! back as a hidden JSON field, so a plain reload starts from an empty table.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use askama::Template;
use house_numbers_core::{dashboard::DashboardState, domain::Entry, flows, Identity};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::WebError;
use crate::web::{cookies, pages::DashboardPage, state::AppState, LANDING_PATH};

const LOGOUT_INTENT: &str = "logout";

#[derive(Deserialize)]
pub struct DashboardForm {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub text: String,
    /// Entries of the page the form was posted from, as JSON.
    #[serde(default)]
    pub entries: String,
}

/// GET /dashboard - A fresh dashboard with no entries
pub async fn dashboard_handler(
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>, WebError> {
    render(DashboardState::default(), &identity)
}

/// POST /dashboard - Summarize a text, or log out when `intent=logout`
pub async fn dashboard_action_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    headers: HeaderMap,
    Form(form): Form<DashboardForm>,
) -> Result<Response, WebError> {
    let cookie = cookies::cookie_header(&headers);
    let mut view = DashboardState::restore(decode_entries(&form.entries));

    if form.intent == LOGOUT_INTENT {
        match flows::logout(state.auth.as_ref(), cookie.as_deref()).await {
            Ok(()) => {
                info!("Session logged out");
                let cleared = cookies::clear_session(state.config.cookie_secure);
                let response = ([(header::SET_COOKIE, cleared)], Redirect::to(LANDING_PATH));
                return Ok(response.into_response());
            }
            Err(e) => {
                warn!("Logout refused: {}", e);
                view.record_logout_failure(&form.text, &e);
            }
        }
    } else {
        let outcome =
            flows::submit_entry(state.summarizer.as_ref(), cookie.as_deref(), &form.text).await;
        view.record_submission(&form.text, outcome);
    }

    Ok(render(view, &identity)?.into_response())
}

fn render(view: DashboardState, identity: &Identity) -> Result<Html<String>, WebError> {
    Ok(Html(DashboardPage::new(view, identity)?.render()?))
}

/// Page state is not a source of truth: anything unreadable starts over empty.
fn decode_entries(raw: &str) -> Vec<Entry> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Discarding unreadable page entries: {}", e);
        Vec::new()
    })
}
