//! Chat-completion request/response shapes and the backend capability.
//!
//! The wire format is the common chat-completion JSON:
//!
//! ```text
//! POST {"model": "...", "messages": [{"role": "user", "content": "..."}]}
//! 200  {"choices": [{"message": {"content": "..."}}], ...}
//! ```
//!
//! Only the fields the controller reads are modelled; anything else in the
//! response is ignored.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use dogechat_core::models::message::Message;

use crate::error::CompletionError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, or `None` when the model said
    /// nothing (no choices, null content, or only whitespace).
    pub fn reply_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

// ── Backend capability ───────────────────────────────────────────────────────

/// Anything that turns a conversation snapshot into a completion.
///
/// Methods return boxed futures for dyn compatibility.
pub trait ChatBackend: Send + Sync {
    fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'_, Result<ChatCompletionResponse, CompletionError>>;
}
