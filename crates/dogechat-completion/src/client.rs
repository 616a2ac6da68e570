use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::chat::{BoxFuture, ChatBackend, ChatCompletionRequest, ChatCompletionResponse};
use crate::error::CompletionError;

/// HTTP client for the proxy forwarder's chat endpoint.
///
/// Carries no credential; the proxy attaches it server side.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    url: String,
}

impl ProxyClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        debug!(model = %request.model, messages = request.messages.len(), "sending chat request");

        let resp = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!(status = status.as_u16(), %message, "chat request rejected");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| CompletionError::ResponseParse(e.to_string()))
    }
}

impl ChatBackend for ProxyClient {
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'_, Result<ChatCompletionResponse, CompletionError>> {
        Box::pin(self.send(request))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts both the proxy's `{"error": "..."}` and the upstream's
/// `{"error": {"message": "..."}}` shapes.
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
