//! Persistence behind an injectable key/value store, and the theme preference
//! that uses it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::THEME_STORAGE_KEY;
use crate::error::StorageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = win.local_storage()?.ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.storage.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.storage.set_item(key, value)?)
    }
}

/// Process-local store. Used when `localStorage` is unavailable (private
/// browsing, sandboxed iframes) and as a test double.
#[derive(Default, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best available store for this browser.
pub fn default_store() -> Rc<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Rc::new(store),
        Err(err) => {
            log::warn!("falling back to in-memory store: {err}");
            Rc::new(MemoryStore::default())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Saved preference wins; otherwise follow the system setting.
    pub fn load(store: &dyn KeyValueStore, system_prefers_dark: bool) -> Theme {
        match store.get(THEME_STORAGE_KEY) {
            Ok(Some(saved)) => {
                if saved == "dark" {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            Ok(None) => Theme::from_system(system_prefers_dark),
            Err(err) => {
                log::warn!("could not read theme preference: {err}");
                Theme::from_system(system_prefers_dark)
            }
        }
    }

    pub fn save(self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(THEME_STORAGE_KEY, self.as_str())
    }

    fn from_system(prefers_dark: bool) -> Theme {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Reflect the theme on `<html>` as `data-theme` and the `dark` class.
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(err) = root.set_attribute("data-theme", theme.as_str()) {
        log::warn!("could not apply theme attribute: {err:?}");
    }
    let classes = root.class_list();
    let res = match theme {
        Theme::Dark => classes.add_1("dark"),
        Theme::Light => classes.remove_1("dark"),
    };
    if let Err(err) = res {
        log::warn!("could not apply theme class: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn unsaved_theme_follows_system() {
        let store = MemoryStore::default();
        assert_eq!(Theme::load(&store, true), Theme::Dark);
        assert_eq!(Theme::load(&store, false), Theme::Light);
    }

    #[test]
    fn saved_theme_overrides_system() {
        let store = MemoryStore::default();
        Theme::Light.save(&store).unwrap();
        assert_eq!(Theme::load(&store, true), Theme::Light);
        Theme::Light.toggled().save(&store).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store, false), Theme::Dark);
    }

    #[test]
    fn unreadable_store_falls_back_to_system() {
        assert_eq!(Theme::load(&BrokenStore, true), Theme::Dark);
        assert!(Theme::Dark.save(&BrokenStore).is_err());
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let a = MemoryStore::default();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
    }
}
