use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    #[error("invalid calendar day: {0}")]
    InvalidDate(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
