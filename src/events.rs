//! Typed Event Bus
//!
//! Replaces ad-hoc DOM events for "the cart changed" notifications.
//!
//! Delivery: `publish` calls every subscriber registered at the moment
//! of the call, synchronously, on the publishing thread. Subscribers
//! added during delivery only see later events. There is no ordering
//! guarantee between independent publishers.

use std::sync::{Arc, Mutex};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::storage::StorageKey;

pub type SubscriptionId = u64;

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Subscribers<E> {
    next_id: SubscriptionId,
    handlers: Vec<(SubscriptionId, Handler<E>)>,
}

pub struct EventBus<E> {
    inner: Arc<Mutex<Subscribers<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Subscribers {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + Send + Sync + 'static) -> SubscriptionId {
        let Ok(mut subs) = self.inner.lock() else {
            log::error!("[EVENTS] Subscriber list poisoned, dropping subscription");
            return SubscriptionId::MAX;
        };
        let id = subs.next_id;
        subs.next_id += 1;
        subs.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut subs) = self.inner.lock() else {
            return false;
        };
        let before = subs.handlers.len();
        subs.handlers.retain(|(sub_id, _)| *sub_id != id);
        subs.handlers.len() != before
    }

    pub fn publish(&self, event: &E) {
        // Snapshot so handlers may (un)subscribe without deadlocking
        let snapshot: Vec<Handler<E>> = match self.inner.lock() {
            Ok(subs) => subs.handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(_) => return,
        };
        for handler in snapshot {
            handler(event);
        }
    }

}

/// Notifications about the local cart
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Written by this view
    Changed { count: i64, total: f64 },
    Cleared,
    /// Written by another tab
    ExternalChange,
}

/// Forward `storage` events for the cart key (fired in *other* tabs)
/// onto the bus. The listener lives for the rest of the page.
pub fn bridge_storage_events(bus: EventBus<CartEvent>) {
    let Some(window) = web_sys::window() else {
        log::warn!("[EVENTS] No window, cross-tab cart sync disabled");
        return;
    };
    let listener = Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        // key() is None when the whole storage was cleared
        let relevant = ev
            .key()
            .map_or(true, |key| key == StorageKey::Cart.as_str());
        if relevant {
            log::debug!("[EVENTS] Cart changed in another tab");
            bus.publish(&CartEvent::ExternalChange);
        }
    });
    if let Err(e) = window.add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref()) {
        log::warn!("[EVENTS] Failed to listen for storage events: {:?}", e);
    }
    listener.forget();
}
