//! crates/house_numbers_core/src/ports.rs
//!
//! Defines the gateway contracts (traits) to the remote services.
//! The flows only ever talk to these traits, so the HTTP adapters can be
//! swapped for in-memory fakes in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Credentials, Identity};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of the HTTP client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    /// The remote service could not be reached or the exchange broke off.
    #[error("{0}")]
    Transport(String),
    /// The remote service answered with a non-2xx status.
    #[error("Remote service responded with {status}: {reason}")]
    Status { status: u16, reason: String },
    /// The remote service answered 2xx but the body could not be read.
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// The outcome of a logout call, as judged by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutReply {
    Ok,
    /// The remote service refused; carries the status text to show the user.
    Refused(String),
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for a token. Returns the raw JSON body on 2xx so
    /// the caller can decide what a usable grant looks like.
    async fn login(&self, credentials: &Credentials) -> PortResult<Value>;

    /// Ends the session identified by the forwarded cookie header.
    async fn logout(&self, cookie: Option<&str>) -> PortResult<LogoutReply>;

    /// Resolves the user behind the forwarded cookie header, if any.
    async fn current_user(&self, cookie: Option<&str>) -> PortResult<Option<Identity>>;
}

#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Summarizes `text`. `Ok(None)` means the service answered without a summary.
    async fn summarize(&self, cookie: Option<&str>, text: &str) -> PortResult<Option<String>>;
}
