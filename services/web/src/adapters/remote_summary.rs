use async_trait::async_trait;
use house_numbers_core::ports::{PortError, PortResult, SummarizationService};
use reqwest::{header::COOKIE, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{reason, send};

const SNIPPETS_PATH: &str = "/api/v1/snippets";

#[derive(Serialize)]
struct SnippetRequest<'a> {
    text: &'a str,
}

/// Anything but a string in `summary` is treated as no summary at all.
#[derive(Deserialize)]
struct SnippetResponse {
    #[serde(default)]
    summary: Option<Value>,
}

/// Summarization Gateway backed by the remote snippets endpoint.
#[derive(Clone)]
pub struct RemoteSummaryAdapter {
    client: Client,
    base_url: String,
}

impl RemoteSummaryAdapter {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SummarizationService for RemoteSummaryAdapter {
    async fn summarize(&self, cookie: Option<&str>, text: &str) -> PortResult<Option<String>> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, SNIPPETS_PATH))
            .json(&SnippetRequest { text });
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = send(request).await?;
        if !response.status().is_success() {
            return Err(PortError::Status {
                status: response.status().as_u16(),
                reason: reason(response.status()),
            });
        }

        let body: SnippetResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(body
            .summary
            .and_then(|summary| match summary {
                Value::String(s) => Some(s),
                _ => None,
            })
            .filter(|s| !s.is_empty()))
    }
}
