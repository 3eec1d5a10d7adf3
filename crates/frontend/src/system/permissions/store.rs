//! Durable storage of the permission map.
//!
//! The map lives as one JSON blob under a fixed key. Writes are always
//! followed by a full page reload so the menu, the route guard and the
//! settings page all start over from the committed value.

use contracts::system::menu::MenuItem;
use contracts::system::permissions::{default_permission_map, PermissionMap};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("failed to serialize permissions: {0}")]
    Serialize(String),

    #[error("failed to reload the page: {0}")]
    Reload(String),
}

/// String key-value storage, localStorage in the browser
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PermissionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), PermissionError>;
    fn remove_item(&self, key: &str) -> Result<(), PermissionError>;
}

pub trait PageReloader {
    fn reload(&self) -> Result<(), PermissionError>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, PermissionError> {
        web_sys::window()
            .ok_or_else(|| PermissionError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| PermissionError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| PermissionError::Storage("localStorage is disabled".into()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PermissionError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PermissionError::Storage(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PermissionError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PermissionError::Storage(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), PermissionError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| PermissionError::Storage(format!("{:?}", e)))
    }
}

/// In-memory storage for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PermissionError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PermissionError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PermissionError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.location.reload()`
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowReloader;

impl PageReloader for WindowReloader {
    fn reload(&self) -> Result<(), PermissionError> {
        web_sys::window()
            .ok_or_else(|| PermissionError::Reload("no window".into()))?
            .location()
            .reload()
            .map_err(|e| PermissionError::Reload(format!("{:?}", e)))
    }
}

/// Counts reloads instead of performing them
#[derive(Debug, Default)]
pub struct CountingReloader {
    count: Cell<usize>,
}

impl CountingReloader {
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl PageReloader for CountingReloader {
    fn reload(&self) -> Result<(), PermissionError> {
        self.count.set(self.count.get() + 1);
        Ok(())
    }
}

pub struct PermissionStore<S, R> {
    storage: S,
    reloader: R,
    key: String,
}

impl PermissionStore<LocalStorage, WindowReloader> {
    /// Store backed by localStorage under the configured key
    pub fn browser() -> Self {
        Self::new(
            LocalStorage,
            WindowReloader,
            AppConfig::get().permissions.storage_key.clone(),
        )
    }
}

impl<S: KeyValueStorage, R: PageReloader> PermissionStore<S, R> {
    pub fn new(storage: S, reloader: R, key: impl Into<String>) -> Self {
        Self {
            storage,
            reloader,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn reloader(&self) -> &R {
        &self.reloader
    }

    /// The committed map, or `None` when nothing usable is stored.
    ///
    /// A blob that does not parse is treated as absent.
    pub fn load(&self) -> Option<PermissionMap> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read stored permissions: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<PermissionMap>(&raw) {
            Ok(map) => Some(map),
            Err(e) => {
                log::warn!("Ignoring unreadable stored permissions: {}", e);
                None
            }
        }
    }

    /// Stored map, or the computed defaults when nothing is stored
    pub fn effective_map(&self, menu: &[MenuItem]) -> PermissionMap {
        self.load().unwrap_or_else(|| {
            log::debug!("No stored permissions, using defaults");
            default_permission_map(menu)
        })
    }

    /// Writes the whole map, then reloads the page
    pub fn save(&self, map: &PermissionMap) -> Result<(), PermissionError> {
        let raw = serde_json::to_string(map).map_err(|e| PermissionError::Serialize(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)?;
        log::info!("Saved permissions for {} roles", map.roles().count());
        self.reloader.reload()
    }

    /// Deletes the stored map so the defaults apply, then reloads
    pub fn reset(&self) -> Result<(), PermissionError> {
        self.storage.remove_item(&self.key)?;
        log::info!("Reset permissions to defaults");
        self.reloader.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::menu::admin_menu;
    use contracts::system::roles::Role;

    fn store() -> PermissionStore<MemoryStorage, CountingReloader> {
        PermissionStore::new(MemoryStorage::default(), CountingReloader::default(), "menuPermissions")
    }

    #[test]
    fn test_defaults_apply_when_nothing_stored() {
        let store = store();
        assert!(store.load().is_none());
        let map = store.effective_map(&admin_menu());
        assert!(map.get(Role::Admin, "Bookings:Pending"));
        assert!(!map.get(Role::Driver, "Bookings"));
    }

    #[test]
    fn test_save_writes_then_reloads() {
        let store = store();
        let mut map = PermissionMap::new();
        map.set(Role::Driver, "Home", true);

        store.save(&map).unwrap();

        assert_eq!(store.reloader().count(), 1);
        assert_eq!(store.load(), Some(map.clone()));
        let raw = store.storage().get_item("menuPermissions").unwrap().unwrap();
        assert_eq!(raw, r#"{"driver":{"Home":true}}"#);
        // A stored map is used verbatim: absent keys are denied
        assert!(!store.effective_map(&admin_menu()).get(Role::Admin, "Home"));
    }

    #[test]
    fn test_reset_removes_then_reloads() {
        let store = store();
        store.save(&PermissionMap::new()).unwrap();
        store.reset().unwrap();

        assert_eq!(store.reloader().count(), 2);
        assert!(store.load().is_none());
        assert!(store.effective_map(&admin_menu()).get(Role::Admin, "Home"));
    }

    #[test]
    fn test_unreadable_blob_falls_back_to_defaults() {
        let store = store();
        store.storage().set_item("menuPermissions", "[1, 2").unwrap();
        assert!(store.load().is_none());
        assert!(store.effective_map(&admin_menu()).get(Role::Accountant, "Reports"));
    }
}
