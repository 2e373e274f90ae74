//! Reading the inbound cookie header and building `Set-Cookie` values for
//! the session cookie.

use axum::http::{header, HeaderMap};
use house_numbers_core::domain::{SessionCookie, SESSION_COOKIE};

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// The inbound `Cookie` header, forwarded verbatim to the remote services.
///
/// HTTP/2 clients may split cookies over several headers; those are rejoined.
pub fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

/// `Set-Cookie` value handing the browser a fresh session.
pub fn set_session(session: &SessionCookie, secure: bool) -> String {
    let expires = session.expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    with_attributes(
        format!("{}={}; Path=/; Expires={}", SESSION_COOKIE, session.token, expires),
        secure,
    )
}

/// `Set-Cookie` value that makes the browser drop the session.
pub fn clear_session(secure: bool) -> String {
    with_attributes(format!("{}=; Path=/; Expires={}", SESSION_COOKIE, EXPIRED), secure)
}

fn with_attributes(mut cookie: String, secure: bool) -> String {
    cookie.push_str("; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
