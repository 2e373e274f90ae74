//! services/web/src/adapters/remote_auth.rs
//!
//! The Auth Gateway: implements the `AuthService` port against the remote
//! authentication API, forwarding the browser's cookie header verbatim.

use async_trait::async_trait;
use house_numbers_core::domain::{Credentials, Identity};
use house_numbers_core::ports::{AuthService, LogoutReply, PortError, PortResult};
use reqwest::{header::COOKIE, Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{reason, send};

const LOGIN_PATH: &str = "/api/v1/auth/login";
const LOGOUT_PATH: &str = "/api/v1/auth/logout";
const ME_PATH: &str = "/api/v1/auth/me";

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

/// An HTTP adapter that implements the `AuthService` port.
#[derive(Clone)]
pub struct RemoteAuthAdapter {
    client: Client,
    base_url: String,
}

impl RemoteAuthAdapter {
    /// Creates a new `RemoteAuthAdapter`. `base_url` must not end with `/`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn with_cookie(request: RequestBuilder, cookie: Option<&str>) -> RequestBuilder {
    match cookie {
        Some(cookie) => request.header(COOKIE, cookie),
        None => request,
    }
}

/// `null` and `false` count as absent.
fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

#[async_trait]
impl AuthService for RemoteAuthAdapter {
    async fn login(&self, credentials: &Credentials) -> PortResult<Value> {
        debug!("Logging in {}", credentials.email);
        let request = self.client.post(self.url(LOGIN_PATH)).json(&LoginPayload {
            email: &credentials.email,
            password: &credentials.password,
        });

        let response = send(request).await?;
        if !response.status().is_success() {
            return Err(PortError::Status {
                status: response.status().as_u16(),
                reason: reason(response.status()),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn logout(&self, cookie: Option<&str>) -> PortResult<LogoutReply> {
        let request = with_cookie(self.client.post(self.url(LOGOUT_PATH)), cookie)
            .json(&serde_json::json!({}));

        let response = send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(LogoutReply::Refused(reason(status)));
        }

        // The body is informational; an empty or non-JSON body still counts.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        match body.get("ok") {
            Some(ok) if !is_present(ok) => {
                let status_text = body
                    .get("statusText")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| "Logout failed".to_string());
                Ok(LogoutReply::Refused(status_text))
            }
            _ => Ok(LogoutReply::Ok),
        }
    }

    async fn current_user(&self, cookie: Option<&str>) -> PortResult<Option<Identity>> {
        let request = with_cookie(self.client.get(self.url(ME_PATH)), cookie);

        let response = send(request).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Identity check answered {}", status);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PortError::Status {
                status: status.as_u16(),
                reason: reason(status),
            });
        }

        let mut body = response
            .json::<Value>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(body
            .get_mut("user")
            .map(Value::take)
            .filter(is_present)
            .map(Identity))
    }
}
