//! crates/house_numbers_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! None of these are persisted; the remote services own all durable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the browser cookie holding the bearer token.
pub const SESSION_COOKIE: &str = "__session";

/// A login submission. Only lives for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// One (submitted text, returned summary) pair shown in the dashboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    pub summary: String,
}

/// The user as reported by the remote identity check.
///
/// The payload is opaque to this application; only its presence gates
/// access to protected views.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity(pub Value);

impl Identity {
    /// The user's e-mail address, when the remote service includes one.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

// Represents a browser login session (the `__session` cookie)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
