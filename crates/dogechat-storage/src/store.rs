use crate::error::StorageError;

/// String key/value storage that survives restarts of the front-end.
///
/// Implementations are shared between the rate limiter and the theme
/// preference, so every method takes `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
