//! Floating Cart Summary
//!
//! Sticky pill with the item count and total; hidden for an empty cart.

use leptos::prelude::*;

use crate::cart;
use crate::context::{use_app_context, Page};
use crate::models::format_price;
use crate::store::{use_app_store, AppStateStoreFields};

fn item_label(count: i64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

#[component]
pub fn FloatingCart() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let count = move || store.cart().with(|items| cart::item_count(items));
    let total = move || store.cart().with(|items| cart::cart_total(items));

    view! {
        <Show when=move || { count() > 0 }>
            <button class="floating-cart" on:click=move |_| ctx.navigate(Page::Cart)>
                <span class="floating-count">
                    {move || item_label(count())}
                </span>
                <span class="floating-total">{move || format_price(total())}</span>
                <span class="floating-cta">"View cart →"</span>
            </button>
        </Show>
    }
}
