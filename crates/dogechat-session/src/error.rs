use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage error: {0}")]
    Storage(#[from] dogechat_storage::error::StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] dogechat_core::error::CoreError),

    #[error("completion setup error: {0}")]
    Completion(#[from] dogechat_completion::error::CompletionError),
}
