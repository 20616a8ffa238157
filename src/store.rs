//! Application State
//!
//! `CartStore` is the injectable owner of the persisted local cart:
//! every mutation is read-modify-write against storage, then published
//! on the cart event bus. `AppState` is the reactive mirror the views
//! render from.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cart;
use crate::error::AppResult;
use crate::events::{CartEvent, EventBus, SubscriptionId};
use crate::models::{LineItem, Profile};
use crate::storage::{clear_handoff, load_profile, read_json, write_json, SharedStorage, StorageKey};

// ========================
// Cart Store
// ========================

#[derive(Clone)]
pub struct CartStore {
    storage: SharedStorage,
    bus: EventBus<CartEvent>,
}

impl CartStore {
    pub fn new(storage: SharedStorage, bus: EventBus<CartEvent>) -> Self {
        Self { storage, bus }
    }

    /// Current persisted cart; corrupt data reads as empty
    pub fn items(&self) -> Vec<LineItem> {
        read_json(self.storage.as_ref(), StorageKey::Cart).unwrap_or_default()
    }

    pub fn total(&self) -> f64 {
        cart::cart_total(&self.items())
    }

    pub fn count(&self) -> i64 {
        cart::item_count(&self.items())
    }

    pub fn add(&self, item: LineItem) -> AppResult<()> {
        log::debug!("[CART] add {} x{}", item.item_id, item.quantity);
        self.mutate(|items| {
            cart::add_item(items, item);
            true
        })
        .map(|_| ())
    }

    /// Returns false if no item has `item_id`
    pub fn set_quantity(&self, item_id: &str, quantity: i64) -> AppResult<bool> {
        self.mutate(|items| cart::set_quantity(items, item_id, quantity))
    }

    pub fn increment(&self, item_id: &str) -> AppResult<bool> {
        self.mutate(|items| cart::increment(items, item_id))
    }

    pub fn decrement(&self, item_id: &str) -> AppResult<bool> {
        self.mutate(|items| cart::decrement(items, item_id))
    }

    pub fn remove(&self, item_id: &str) -> AppResult<bool> {
        self.mutate(|items| cart::remove_item(items, item_id))
    }

    pub fn replace(&self, items: Vec<LineItem>) -> AppResult<()> {
        self.mutate(move |current| {
            *current = items;
            true
        })
        .map(|_| ())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.storage.remove(StorageKey::Cart);
        log::info!("[CART] cleared");
        self.bus.publish(&CartEvent::Cleared);
        Ok(())
    }

    /// A paid order empties the cart and drops the pending checkout
    pub fn complete_checkout(&self) -> AppResult<()> {
        clear_handoff(self.storage.as_ref());
        self.clear()
    }

    pub fn subscribe(&self, handler: impl Fn(&CartEvent) + Send + Sync + 'static) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<LineItem>) -> bool) -> AppResult<bool> {
        let mut items = self.items();
        if !f(&mut items) {
            return Ok(false);
        }
        write_json(self.storage.as_ref(), StorageKey::Cart, &items)?;
        self.bus.publish(&CartEvent::Changed {
            count: cart::item_count(&items),
            total: cart::cart_total(&items),
        });
        Ok(true)
    }
}

/// Get the cart store from context, as a `Copy` handle for closures
pub fn use_cart_store() -> StoredValue<CartStore> {
    StoredValue::new(expect_context::<CartStore>())
}

// ========================
// Theme
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// `theme` wins over the older `dark-mode` flag
    pub fn load(storage: &SharedStorage) -> Self {
        match storage.get(StorageKey::Theme).as_deref() {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ => match storage.get(StorageKey::DarkMode).as_deref() {
                Some("true") => Theme::Dark,
                _ => Theme::Light,
            },
        }
    }

    pub fn save(self, storage: &SharedStorage) -> AppResult<()> {
        storage.set(StorageKey::Theme, self.as_str())?;
        storage.set(StorageKey::DarkMode, if self == Theme::Dark { "true" } else { "false" })
    }
}

// ========================
// Reactive mirror
// ========================

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Local cart as last persisted
    pub cart: Vec<LineItem>,
    /// Signed-in user, from the session cache
    pub profile: Option<Profile>,
    pub theme: Theme,
    /// Last fetched wallet balance
    pub wallet_balance: Option<f64>,
    /// Code of the shared cart being viewed
    pub shared_code: Option<String>,
}

impl AppState {
    /// Initial state from the persisted layout
    pub fn load(storage: &SharedStorage) -> Self {
        Self {
            cart: read_json(storage.as_ref(), StorageKey::Cart).unwrap_or_default(),
            profile: load_profile(storage.as_ref()),
            theme: Theme::load(storage),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Keep `AppState::cart` in step with the cart store, including
/// changes made from other tabs.
pub fn mirror_cart(cart_store: &CartStore, app_store: AppStore) -> SubscriptionId {
    app_store.cart().set(cart_store.items());
    let source = cart_store.clone();
    cart_store.subscribe(move |_event| {
        app_store.cart().set(source.items());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CheckoutHandoff;
    use crate::storage::{read_handoff, write_handoff, MemoryStorage};
    use std::sync::{Arc, Mutex};

    fn cart_store() -> CartStore {
        CartStore::new(MemoryStorage::shared(), EventBus::new())
    }

    #[test]
    fn test_add_persists_and_merges() {
        let store = cart_store();
        store.add(LineItem::new("A", "Rice", 100.0, 1)).unwrap();
        store.add(LineItem::new("A", "Rice", 100.0, 1)).unwrap();

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(store.total(), 200.0);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_two_handles_share_storage() {
        let storage = MemoryStorage::shared();
        let a = CartStore::new(storage.clone(), EventBus::new());
        let b = CartStore::new(storage, EventBus::new());

        a.add(LineItem::new("A", "Rice", 100.0, 1)).unwrap();
        assert_eq!(b.items().len(), 1);
    }

    #[test]
    fn test_mutations_publish_events() {
        let store = cart_store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |ev| sink.lock().unwrap().push(ev.clone()));

        store.add(LineItem::new("B", "Oil", 150.0, 1)).unwrap();
        store.increment("B").unwrap();
        store.clear().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CartEvent::Changed { count: 1, total: 150.0 },
                CartEvent::Changed { count: 2, total: 300.0 },
                CartEvent::Cleared,
            ]
        );
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_replace_persists_and_publishes() {
        let storage = MemoryStorage::shared();
        let store = CartStore::new(storage.clone(), EventBus::new());
        store.add(LineItem::new("A", "Rice", 100.0, 1)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |ev| sink.lock().unwrap().push(ev.clone()));

        store
            .replace(vec![LineItem::new("B", "Oil", 150.0, 2), LineItem::new("C", "Salt", 20.0, 1)])
            .unwrap();

        let reread = CartStore::new(storage, EventBus::new());
        let ids: Vec<_> = reread.items().into_iter().map(|item| item.item_id).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(*seen.lock().unwrap(), vec![CartEvent::Changed { count: 3, total: 320.0 }]);
    }

    #[test]
    fn test_complete_checkout_clears_cart_and_handoff() {
        let storage = MemoryStorage::shared();
        let store = CartStore::new(storage.clone(), EventBus::new());
        store.add(LineItem::new("A", "Rice", 100.0, 2)).unwrap();
        write_handoff(storage.as_ref(), &CheckoutHandoff::from_items(store.items())).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |ev| sink.lock().unwrap().push(ev.clone()));

        store.complete_checkout().unwrap();

        assert!(store.items().is_empty());
        assert!(read_handoff(storage.as_ref()).is_none());
        assert_eq!(*seen.lock().unwrap(), vec![CartEvent::Cleared]);
    }

    #[test]
    fn test_noop_mutation_publishes_nothing() {
        let store = cart_store();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        store.subscribe(move |_| *sink.lock().unwrap() += 1);

        assert!(!store.remove("missing").unwrap());
        assert!(!store.set_quantity("missing", 3).unwrap());
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn test_quantity_floor_through_store() {
        let store = cart_store();
        store.add(LineItem::new("A", "Rice", 100.0, 1)).unwrap();
        store.decrement("A").unwrap();
        store.set_quantity("A", 0).unwrap();
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[test]
    fn test_corrupt_cart_reads_empty() {
        let storage = MemoryStorage::shared();
        storage.set(StorageKey::Cart, "oops").unwrap();
        let store = CartStore::new(storage, EventBus::new());
        assert!(store.items().is_empty());
        store.add(LineItem::new("A", "Rice", 1.0, 1)).unwrap();
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_app_state_load() {
        let storage = MemoryStorage::shared();
        let store = CartStore::new(storage.clone(), EventBus::new());
        store.add(LineItem::new("A", "Rice", 100.0, 2)).unwrap();
        storage.set(StorageKey::Theme, "dark").unwrap();

        let state = AppState::load(&storage);
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.profile.is_none());
        assert!(state.shared_code.is_none());
    }

    #[test]
    fn test_theme_persistence() {
        let storage = MemoryStorage::shared();
        assert_eq!(Theme::load(&storage), Theme::Light);

        storage.set(StorageKey::DarkMode, "true").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Dark);

        Theme::Light.save(&storage).unwrap();
        assert_eq!(Theme::load(&storage), Theme::Light);
        assert_eq!(storage.get(StorageKey::DarkMode).as_deref(), Some("false"));
    }
}
