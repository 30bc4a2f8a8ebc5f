use starfield_core::{StarfieldError, StateStore};
use web_sys as web;

/// `window.localStorage`, or nothing when the browser blocks it (private
/// mode, sandboxed iframes). Reads then miss and writes report an error.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Option<web::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[storage] localStorage unavailable; starfield state will not persist");
        }
        Self { storage }
    }
}

impl StateStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &'static str, value: &str) -> starfield_core::Result<()> {
        let storage = self.storage.as_ref().ok_or_else(|| StarfieldError::StorageWrite {
            key,
            reason: "localStorage unavailable".to_string(),
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| StarfieldError::StorageWrite {
                key,
                reason: format!("{:?}", e),
            })
    }
}
