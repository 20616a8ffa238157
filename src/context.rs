//! Application Context
//!
//! Navigation, toast notifications and the global error policy,
//! provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::error::AppError;
use crate::storage::{clear_session, SharedStorage};
use crate::store::{AppStateStoreFields, AppStore};

const TOAST_MS: u32 = 4_000;

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Shop,
    Cart,
    Checkout,
    SharedCart,
    Wallet,
    History,
    Directory,
    Analysis,
    Profile,
    Login,
    Signup,
}

impl Page {
    /// Pages listed in the nav bar, in order
    pub const NAV: [Page; 7] = [
        Page::Shop,
        Page::Cart,
        Page::SharedCart,
        Page::Wallet,
        Page::History,
        Page::Directory,
        Page::Analysis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Shop => "Shop",
            Page::Cart => "Cart",
            Page::Checkout => "Checkout",
            Page::SharedCart => "Shared Cart",
            Page::Wallet => "Wallet",
            Page::History => "Orders",
            Page::Directory => "Stores & Drivers",
            Page::Analysis => "Shop Analysis",
            Page::Profile => "Profile",
            Page::Login => "Log in",
            Page::Signup => "Sign up",
        }
    }

    /// Pages that call authenticated endpoints
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Page::Checkout | Page::SharedCart | Page::Wallet | Page::History | Page::Analysis | Page::Profile
        )
    }

    /// Where navigation actually lands given the sign-in state
    pub fn resolve(self, signed_in: bool) -> Page {
        if self.requires_auth() && !signed_in {
            Page::Login
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Visible toasts, oldest first - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
    store: AppStore,
    storage: StoredValue<SharedStorage>,
}

impl AppContext {
    pub fn new(
        page: (ReadSignal<Page>, WriteSignal<Page>),
        toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>),
        store: AppStore,
        storage: SharedStorage,
    ) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
            toasts: toasts.0,
            set_toasts: toasts.1,
            next_toast: StoredValue::new(0),
            store,
            storage: StoredValue::new(storage),
        }
    }

    /// Storage the app was built over
    pub fn storage(&self) -> SharedStorage {
        self.storage.get_value()
    }

    pub fn signed_in(&self) -> bool {
        self.store.profile().with_untracked(Option::is_some)
    }

    /// Switch page; protected pages redirect to login when signed out
    pub fn navigate(&self, page: Page) {
        let target = page.resolve(self.signed_in());
        if target != page {
            log::info!("[NAV] {:?} requires sign-in", page);
        }
        self.set_page.set(target);
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        self.set_toasts.update(|list| list.push(toast));

        let set_toasts = self.set_toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            set_toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastKind::Info, message);
    }

    /// Surface a failure. A 401 anywhere drops the credential and
    /// sends the user to the login page.
    pub fn report(&self, err: &AppError) {
        log::warn!("[APP] {}", err);
        if err.is_unauthorized() {
            clear_session(self.storage().as_ref());
            self.store.profile().set(None);
            self.set_page.set(Page::Login);
        }
        self.notify(ToastKind::Error, err.to_string());
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
