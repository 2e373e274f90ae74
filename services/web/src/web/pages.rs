//! Page templates.

use askama::Template;
use house_numbers_core::{dashboard::DashboardState, domain::Entry, Identity};

use crate::error::WebError;

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user_email: Option<String>,
    pub entries: Vec<Entry>,
    /// The entries again, serialized for the hidden form fields.
    pub entries_json: String,
    pub input: String,
    pub error: Option<String>,
}

impl DashboardPage {
    pub fn new(view: DashboardState, identity: &Identity) -> Result<Self, WebError> {
        Ok(Self {
            user_email: identity.email().map(str::to_string),
            entries_json: serde_json::to_string(&view.entries)?,
            entries: view.entries,
            input: view.input,
            error: view.error,
        })
    }
}
