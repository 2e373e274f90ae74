//! crates/house_numbers_core/src/flows.rs
//!
//! The session-gated request/response flows: identity check, login, entry
//! submission and logout. Each flow makes at most one gateway call and never
//! retries.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{Entry, Identity, SessionCookie};
use crate::ports::{AuthService, LogoutReply, PortError, SummarizationService};
use crate::validation::{self, ValidationError};

/// Shown in place of a summary when the service answers without one.
pub const PLACEHOLDER_SUMMARY: &str = "(No summary returned)";

/// A flow failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid form data")]
    InvalidInput(#[from] ValidationError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The auth service could not be reached; carries the transport message.
    #[error("{0}")]
    AuthUnavailable(String),
    /// Login answered 2xx without a usable token/expiry; carries the raw body.
    #[error("{0}")]
    MalformedGrant(String),
    #[error("Failed to summarize text")]
    Summarization,
    /// Logout was refused; carries the remote status text.
    #[error("{0}")]
    LogoutRefused(String),
}

/// Asks the auth service who is behind `cookie`.
///
/// Any failure to reach the service counts as "nobody".
pub async fn resolve_identity(auth: &dyn AuthService, cookie: Option<&str>) -> Option<Identity> {
    if cookie.is_none() {
        return None;
    }
    match auth.current_user(cookie).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Identity check failed, treating as signed out: {}", e);
            None
        }
    }
}

/// Validates the submission, logs in and returns the cookie to hand the browser.
pub async fn login(
    auth: &dyn AuthService,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<SessionCookie, FlowError> {
    let credentials = validation::credentials(email, password)?;

    let body = auth.login(&credentials).await.map_err(|e| {
        warn!("Login call failed: {}", e);
        match e {
            PortError::Status { .. } => FlowError::InvalidCredentials,
            PortError::Transport(msg) | PortError::Unexpected(msg) => {
                FlowError::AuthUnavailable(msg)
            }
        }
    })?;

    let (token, expires_in) = grant_fields(&body)
        .ok_or_else(|| FlowError::MalformedGrant(body.to_string()))?;
    let expires_at = Duration::try_milliseconds((expires_in * 1000.0).round() as i64)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| FlowError::MalformedGrant(body.to_string()))?;

    info!("Login succeeded, session expires at {}", expires_at);
    Ok(SessionCookie {
        token: token.to_string(),
        expires_at,
    })
}

/// Pulls a non-empty `access_token` and a positive `expires_in` (seconds) out
/// of a login response. `expires_in` may arrive as a number or a numeric string.
/// The token ends up in `Set-Cookie`, so it must be made of RFC 6265 cookie-octets.
fn grant_fields(body: &Value) -> Option<(&str, f64)> {
    let token = body
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty() && t.bytes().all(is_cookie_octet))?;
    let expires_in = match body.get("expires_in")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (expires_in.is_finite() && expires_in > 0.0).then_some((token, expires_in))
}

fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// Validates `text`, summarizes it and returns the entry to append.
///
/// The summarizer sees the trimmed text; the entry keeps the text as submitted.
pub async fn submit_entry(
    summarizer: &dyn SummarizationService,
    cookie: Option<&str>,
    text: &str,
) -> Result<Entry, FlowError> {
    let trimmed = validation::entry_text(text)?;

    let summary = summarizer.summarize(cookie, trimmed).await.map_err(|e| {
        warn!("Summarization failed: {}", e);
        FlowError::Summarization
    })?;

    Ok(Entry {
        text: text.to_string(),
        summary: summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_SUMMARY.to_string()),
    })
}

/// Ends the remote session. On `Ok` the caller clears the cookie and redirects.
pub async fn logout(auth: &dyn AuthService, cookie: Option<&str>) -> Result<(), FlowError> {
    match auth.logout(cookie).await {
        Ok(LogoutReply::Ok) => Ok(()),
        Ok(LogoutReply::Refused(status_text)) => Err(FlowError::LogoutRefused(status_text)),
        Err(PortError::Status { reason, .. }) => Err(FlowError::LogoutRefused(reason)),
        Err(e) => {
            warn!("Logout call failed: {}", e);
            Err(FlowError::LogoutRefused(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credentials;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeAuth {
        login: Result<Value, PortError>,
        logout: Result<LogoutReply, PortError>,
        user: Result<Option<Identity>, PortError>,
        calls: AtomicUsize,
        seen_cookies: Mutex<Vec<Option<String>>>,
    }

    impl FakeAuth {
        fn new() -> Self {
            Self {
                login: Ok(json!({ "access_token": "tok", "expires_in": 3600 })),
                logout: Ok(LogoutReply::Ok),
                user: Ok(None),
                calls: AtomicUsize::new(0),
                seen_cookies: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, cookie: Option<&str>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_cookies
                .lock()
                .unwrap()
                .push(cookie.map(str::to_string));
        }
    }

    #[async_trait]
    impl AuthService for FakeAuth {
        async fn login(&self, _credentials: &Credentials) -> Result<Value, PortError> {
            self.record(None);
            self.login.clone()
        }

        async fn logout(&self, cookie: Option<&str>) -> Result<LogoutReply, PortError> {
            self.record(cookie);
            self.logout.clone()
        }

        async fn current_user(&self, cookie: Option<&str>) -> Result<Option<Identity>, PortError> {
            self.record(cookie);
            self.user.clone()
        }
    }

    struct FakeSummarizer {
        reply: Result<Option<String>, PortError>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(Option<String>, String)>>,
    }

    impl FakeSummarizer {
        fn replying(reply: Result<Option<String>, PortError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SummarizationService for FakeSummarizer {
        async fn summarize(
            &self,
            cookie: Option<&str>,
            text: &str,
        ) -> Result<Option<String>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((cookie.map(str::to_string), text.to_string()));
            self.reply.clone()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    const LONG_TEXT: &str = "The quick brown fox jumps over the lazy dog twice.";

    #[tokio::test]
    async fn login_sets_expiry_from_expires_in() {
        let auth = FakeAuth::new();
        let cookie = login(&auth, "ada@example.com", "secret", now()).await.unwrap();
        assert_eq!(cookie.token, "tok");
        assert_eq!(cookie.expires_at, now() + Duration::seconds(3600));
    }

    #[tokio::test]
    async fn login_accepts_string_and_fractional_expiry() {
        let mut auth = FakeAuth::new();
        auth.login = Ok(json!({ "access_token": "tok", "expires_in": "90" }));
        let cookie = login(&auth, "ada@example.com", "secret", now()).await.unwrap();
        assert_eq!(cookie.expires_at, now() + Duration::seconds(90));

        auth.login = Ok(json!({ "access_token": "tok", "expires_in": 1.5 }));
        let cookie = login(&auth, "ada@example.com", "secret", now()).await.unwrap();
        assert_eq!(cookie.expires_at, now() + Duration::milliseconds(1500));
    }

    #[tokio::test]
    async fn login_rejects_bad_shape_without_calling_out() {
        let auth = FakeAuth::new();
        let err = login(&auth, "not-an-email", "secret", now()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid form data");
        let err = login(&auth, "ada@example.com", "short", now()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid form data");
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn login_without_grant_fields_surfaces_raw_body() {
        let bodies = [
            json!({ "expires_in": 3600 }),
            json!({ "access_token": "tok" }),
            json!({ "access_token": "", "expires_in": 3600 }),
            json!({ "access_token": "tok", "expires_in": 0 }),
            json!({ "access_token": "tok", "expires_in": null }),
            json!({ "message": "account locked" }),
        ];
        for body in bodies {
            let mut auth = FakeAuth::new();
            auth.login = Ok(body.clone());
            let err = login(&auth, "ada@example.com", "secret", now()).await.unwrap_err();
            assert_eq!(err, FlowError::MalformedGrant(body.to_string()));
        }
    }

    #[tokio::test]
    async fn login_rejects_tokens_unfit_for_a_cookie() {
        for token in ["tok; Domain=evil.example", "tok,other", "tok en", "tok\"", "tok\\"] {
            let mut auth = FakeAuth::new();
            let body = json!({ "access_token": token, "expires_in": 3600 });
            auth.login = Ok(body.clone());
            let err = login(&auth, "ada@example.com", "secret", now()).await.unwrap_err();
            assert_eq!(err, FlowError::MalformedGrant(body.to_string()), "{token:?}");
        }

        let mut auth = FakeAuth::new();
        auth.login = Ok(json!({ "access_token": "eyJhbGci.eyJzdWIi.c2ln-_=", "expires_in": 60 }));
        let cookie = login(&auth, "ada@example.com", "secret", now()).await.unwrap();
        assert_eq!(cookie.token, "eyJhbGci.eyJzdWIi.c2ln-_=");
    }

    #[tokio::test]
    async fn login_maps_remote_failures() {
        let mut auth = FakeAuth::new();
        auth.login = Err(PortError::Status {
            status: 401,
            reason: "Unauthorized".into(),
        });
        let err = login(&auth, "ada@example.com", "secret", now()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        auth.login = Err(PortError::Transport("connection refused".into()));
        let err = login(&auth, "ada@example.com", "secret", now()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn short_entry_is_rejected_without_calling_out() {
        let summarizer = FakeSummarizer::replying(Ok(Some("X".into())));
        let err = submit_entry(&summarizer, Some("__session=tok"), "Sign in to your account.")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid form data");
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn entry_carries_summary_and_forwards_cookie() {
        let summarizer = FakeSummarizer::replying(Ok(Some("X".into())));
        let input = format!("  {LONG_TEXT}\n");
        let entry = submit_entry(&summarizer, Some("__session=tok"), &input)
            .await
            .unwrap();
        assert_eq!(
            entry,
            Entry {
                text: input.clone(),
                summary: "X".to_string()
            }
        );
        let seen = summarizer.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(Some("__session=tok".to_string()), LONG_TEXT.to_string())]
        );
    }

    #[tokio::test]
    async fn missing_summary_falls_back_to_placeholder() {
        for reply in [None, Some(String::new())] {
            let summarizer = FakeSummarizer::replying(Ok(reply));
            let entry = submit_entry(&summarizer, None, LONG_TEXT).await.unwrap();
            assert_eq!(entry.summary, PLACEHOLDER_SUMMARY);
        }
    }

    #[tokio::test]
    async fn summarization_failure_is_generic() {
        let summarizer = FakeSummarizer::replying(Err(PortError::Status {
            status: 502,
            reason: "Bad Gateway".into(),
        }));
        let err = submit_entry(&summarizer, None, LONG_TEXT).await.unwrap_err();
        assert_eq!(err, FlowError::Summarization);
        assert_eq!(err.to_string(), "Failed to summarize text");
    }

    #[tokio::test]
    async fn logout_dispatches_on_reply() {
        let mut auth = FakeAuth::new();
        assert_eq!(logout(&auth, Some("__session=tok")).await, Ok(()));

        auth.logout = Ok(LogoutReply::Refused("Unauthorized".into()));
        let err = logout(&auth, Some("__session=tok")).await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");

        auth.logout = Err(PortError::Transport("timed out".into()));
        let err = logout(&auth, None).await.unwrap_err();
        assert_eq!(err.to_string(), "timed out");

        let seen = auth.seen_cookies.lock().unwrap();
        assert_eq!(seen[0].as_deref(), Some("__session=tok"));
    }

    #[tokio::test]
    async fn identity_check_failure_means_signed_out() {
        let mut auth = FakeAuth::new();
        auth.user = Ok(Some(Identity(json!({ "id": 1 }))));
        assert!(resolve_identity(&auth, Some("__session=tok")).await.is_some());

        auth.user = Err(PortError::Transport("connection refused".into()));
        assert!(resolve_identity(&auth, Some("__session=tok")).await.is_none());
    }

    #[tokio::test]
    async fn no_cookie_skips_identity_check() {
        let auth = FakeAuth::new();
        assert!(resolve_identity(&auth, None).await.is_none());
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }
}
