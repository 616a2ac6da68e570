use dogechat_core::models::theme::Theme;
use dogechat_core::storage_keys;

use crate::error::StorageError;
use crate::store::KeyValueStore;

/// Load the saved theme. Anything other than a stored `light` means dark.
pub fn load_theme(store: &dyn KeyValueStore) -> Result<Theme, StorageError> {
    let saved = store.get(storage_keys::THEME)?;
    Ok(match saved.as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    })
}

/// Flip the saved theme and return the new one.
pub fn toggle_theme(store: &dyn KeyValueStore) -> Result<Theme, StorageError> {
    let next = load_theme(store)?.toggled();
    store.set(storage_keys::THEME, next.as_str())?;
    tracing::debug!(theme = %next, "theme preference saved");
    Ok(next)
}
