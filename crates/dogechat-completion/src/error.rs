use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request to upstream failed: {0}")]
    Transport(String),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no reply within {0} seconds")]
    Timeout(u64),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid persona policy: {0}")]
    Persona(String),
}
