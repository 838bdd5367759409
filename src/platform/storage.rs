//! LocalStorage access (WASM only)

use crate::highscores::StoreError;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a stored string; missing key and missing storage both read as `None`
pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn write(key: &str, value: &str) -> Result<(), StoreError> {
    let storage = local_storage()
        .ok_or_else(|| StoreError::Unavailable("LocalStorage is disabled".into()))?;
    storage
        .set_item(key, value)
        .map_err(|_| StoreError::Unavailable(format!("LocalStorage rejected {key}")))
}
