pub mod remote_auth;
pub mod remote_summary;

pub use remote_auth::RemoteAuthAdapter;
pub use remote_summary::RemoteSummaryAdapter;

use house_numbers_core::ports::{PortError, PortResult};
use reqwest::{RequestBuilder, Response, StatusCode};

/// Sends a request, folding every client-side failure into `PortError::Transport`.
async fn send(request: RequestBuilder) -> PortResult<Response> {
    request
        .send()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))
}

/// The status text a browser would show for `status`.
fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown status")
        .to_string()
}
