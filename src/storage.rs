//! Persistent Key-Value Storage
//!
//! Abstracts the browser's `localStorage` behind `KeyValueStore` so the
//! cart store and session cache can run against memory in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cart::CheckoutHandoff;
use crate::error::{AppError, AppResult};
use crate::models::{AuthSession, Profile};

/// Keys of the persisted layout. Unversioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Cart,
    Token,
    Name,
    Email,
    UserType,
    Username,
    Phone,
    CheckoutCart,
    CheckoutTotal,
    Theme,
    DarkMode,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Cart => "cart",
            StorageKey::Token => "token",
            StorageKey::Name => "name",
            StorageKey::Email => "email",
            StorageKey::UserType => "type",
            StorageKey::Username => "username",
            StorageKey::Phone => "phone",
            StorageKey::CheckoutCart => "checkoutCart",
            StorageKey::CheckoutTotal => "checkoutTotal",
            StorageKey::Theme => "theme",
            StorageKey::DarkMode => "dark-mode",
        }
    }
}

/// String key-value store shared by every view
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;
    fn set(&self, key: StorageKey, value: &str) -> AppResult<()>;
    fn remove(&self, key: StorageKey);
}

pub type SharedStorage = Arc<dyn KeyValueStore>;

/// `window.localStorage`. Looked up on every call so the handle stays `Send`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn shared() -> SharedStorage {
        Arc::new(BrowserStorage)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        Self::local_storage()?.get_item(key.as_str()).ok().flatten()
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        let storage = Self::local_storage()
            .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key.as_str(), value)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: StorageKey) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key.as_str());
        }
    }
}

/// In-process store for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.entries.lock().ok()?.get(&key).cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&key);
        }
    }
}

// ========================
// Typed helpers
// ========================

/// Missing or unparsable values read as `None`
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: StorageKey) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("[STORAGE] Ignoring corrupt value under '{}': {}", key.as_str(), e);
            None
        }
    }
}

pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| AppError::Storage(e.to_string()))?;
    store.set(key, &raw)
}

// ========================
// Session cache
// ========================

pub fn save_session(store: &dyn KeyValueStore, session: &AuthSession) -> AppResult<()> {
    let user = &session.user;
    store.set(StorageKey::Token, &session.token)?;
    store.set(StorageKey::Name, &user.name)?;
    store.set(StorageKey::Email, &user.email)?;
    store.set(StorageKey::UserType, &user.account_type)?;
    match &user.username {
        Some(username) => store.set(StorageKey::Username, username)?,
        None => store.remove(StorageKey::Username),
    }
    match &user.phone {
        Some(phone) => store.set(StorageKey::Phone, phone)?,
        None => store.remove(StorageKey::Phone),
    }
    Ok(())
}

/// Cached profile; requires a token plus name and email
pub fn load_profile(store: &dyn KeyValueStore) -> Option<Profile> {
    bearer_token(store)?;
    Some(Profile {
        name: store.get(StorageKey::Name)?,
        email: store.get(StorageKey::Email)?,
        account_type: store.get(StorageKey::UserType).unwrap_or_default(),
        username: store.get(StorageKey::Username),
        phone: store.get(StorageKey::Phone),
    })
}

pub fn bearer_token(store: &dyn KeyValueStore) -> Option<String> {
    store.get(StorageKey::Token).filter(|t| !t.is_empty())
}

/// Drop the credential and cached profile fields; the cart stays
pub fn clear_session(store: &dyn KeyValueStore) {
    for key in [
        StorageKey::Token,
        StorageKey::Name,
        StorageKey::Email,
        StorageKey::UserType,
        StorageKey::Username,
        StorageKey::Phone,
    ] {
        store.remove(key);
    }
}

// ========================
// Checkout handoff
// ========================

pub fn write_handoff(store: &dyn KeyValueStore, handoff: &CheckoutHandoff) -> AppResult<()> {
    write_json(store, StorageKey::CheckoutCart, &handoff.items)?;
    store.set(StorageKey::CheckoutTotal, &handoff.total.to_string())
}

/// Total is recomputed when the stored one is missing or unparsable
pub fn read_handoff(store: &dyn KeyValueStore) -> Option<CheckoutHandoff> {
    let items = read_json(store, StorageKey::CheckoutCart)?;
    let stored_total = store
        .get(StorageKey::CheckoutTotal)
        .and_then(|raw| raw.parse::<f64>().ok());
    Some(match stored_total {
        Some(total) => CheckoutHandoff { items, total },
        None => CheckoutHandoff::from_items(items),
    })
}

pub fn clear_handoff(store: &dyn KeyValueStore) {
    store.remove(StorageKey::CheckoutCart);
    store.remove(StorageKey::CheckoutTotal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;

    fn session() -> AuthSession {
        AuthSession {
            token: "tok".to_string(),
            user: Profile {
                name: "Alice".to_string(),
                email: "alice@x.com".to_string(),
                account_type: "customer".to_string(),
                username: Some("alice".to_string()),
                phone: None,
            },
        }
    }

    #[test]
    fn test_session_roundtrip_and_clear() {
        let store = MemoryStorage::new();
        save_session(&store, &session()).unwrap();

        assert_eq!(bearer_token(&store).as_deref(), Some("tok"));
        assert_eq!(load_profile(&store), Some(session().user));

        clear_session(&store);
        assert_eq!(bearer_token(&store), None);
        assert_eq!(load_profile(&store), None);
    }

    #[test]
    fn test_clear_session_keeps_cart() {
        let store = MemoryStorage::new();
        store.set(StorageKey::Cart, "[]").unwrap();
        save_session(&store, &session()).unwrap();
        clear_session(&store);
        assert_eq!(store.get(StorageKey::Cart).as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_json_reads_as_none() {
        let store = MemoryStorage::new();
        store.set(StorageKey::Cart, "{not json").unwrap();
        let items: Option<Vec<LineItem>> = read_json(&store, StorageKey::Cart);
        assert!(items.is_none());
    }

    #[test]
    fn test_handoff_roundtrip() {
        let store = MemoryStorage::new();
        let handoff = CheckoutHandoff::from_items(vec![LineItem::new("A", "Rice", 100.0, 2)]);
        write_handoff(&store, &handoff).unwrap();
        assert_eq!(store.get(StorageKey::CheckoutTotal).as_deref(), Some("200"));
        assert_eq!(read_handoff(&store), Some(handoff));

        clear_handoff(&store);
        assert!(read_handoff(&store).is_none());
    }

    #[test]
    fn test_handoff_recomputes_missing_total() {
        let store = MemoryStorage::new();
        write_json(&store, StorageKey::CheckoutCart, &vec![LineItem::new("A", "Rice", 50.0, 3)]).unwrap();
        assert_eq!(read_handoff(&store).unwrap().total, 150.0);
    }
}
