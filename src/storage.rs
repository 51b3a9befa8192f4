//! Client-side Persistence
//!
//! A single string value (the access level) kept in `window.localStorage`.

use std::cell::RefCell;
use std::rc::Rc;

/// Storage key for the selected access level
pub const LEVEL_STORAGE_KEY: &str = "taskboard.access_level";

/// Minimal key/value persistence used by the level gate
pub trait LevelStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
    fn clear(&self);
}

/// Browser `localStorage` backend
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl LevelStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(LEVEL_STORAGE_KEY).ok().flatten())
    }

    fn save(&self, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(err) = storage.set_item(LEVEL_STORAGE_KEY, value) {
                    tracing::warn!(error = ?err, "failed persisting access level");
                }
            }
            None => tracing::warn!("local storage unavailable, access level not persisted"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(LEVEL_STORAGE_KEY);
        }
    }
}

/// In-memory backend; clones share the same slot
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn with_value(value: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }
}

impl LevelStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
