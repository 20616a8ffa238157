//! QuickCart Frontend App
//!
//! Wires storage, the cart event bus and the reactive store together,
//! then renders the current page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{
    CartPage, CheckoutPage, DirectoryPage, FloatingCart, LoginPage, NavBar, OrderHistoryPage, ProfilePage,
    SharedCartPage, ShopAnalysisPage, ShopPage, SignupPage, ToastStack, WalletPage,
};
use crate::config::AppConfig;
use crate::context::{AppContext, Page, Toast};
use crate::events::{bridge_storage_events, CartEvent, EventBus};
use crate::storage::BrowserStorage;
use crate::store::{mirror_cart, AppState, CartStore};

#[component]
pub fn App() -> impl IntoView {
    let storage = BrowserStorage::shared();

    // Cart events from this tab and, via the storage bridge, from others
    let bus = EventBus::<CartEvent>::new();
    bridge_storage_events(bus.clone());
    let cart_store = CartStore::new(storage.clone(), bus);

    let app_store = Store::new(AppState::load(&storage));
    mirror_cart(&cart_store, app_store);

    let ctx = AppContext::new(
        signal(Page::Shop),
        signal(Vec::<Toast>::new()),
        app_store,
        storage.clone(),
    );

    // Provide context to all children
    provide_context(AppConfig::load());
    provide_context(storage);
    provide_context(cart_store);
    provide_context(app_store);
    provide_context(ctx);

    let current_page = move || match ctx.page.get() {
        Page::Shop => view! { <ShopPage /> }.into_any(),
        Page::Cart => view! { <CartPage /> }.into_any(),
        Page::Checkout => view! { <CheckoutPage /> }.into_any(),
        Page::SharedCart => view! { <SharedCartPage /> }.into_any(),
        Page::Wallet => view! { <WalletPage /> }.into_any(),
        Page::History => view! { <OrderHistoryPage /> }.into_any(),
        Page::Directory => view! { <DirectoryPage /> }.into_any(),
        Page::Analysis => view! { <ShopAnalysisPage /> }.into_any(),
        Page::Profile => view! { <ProfilePage /> }.into_any(),
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Signup => view! { <SignupPage /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">{current_page}</main>
            <Show when=move || ctx.page.get() != Page::Cart && ctx.page.get() != Page::Checkout>
                <FloatingCart />
            </Show>
            <ToastStack />
        </div>
    }
}
