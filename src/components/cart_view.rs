//! Cart Page
//!
//! Local cart with quantity steppers. Checkout writes the handoff
//! snapshot the checkout page reads back.

use leptos::prelude::*;

use super::QuantityStepper;
use crate::cart::{self, CheckoutHandoff};
use crate::context::{use_app_context, Page};
use crate::models::format_price;
use crate::storage::write_handoff;
use crate::store::{use_app_store, use_cart_store, AppStateStoreFields};

#[component]
pub fn CartPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let cart_store = use_cart_store();

    let is_empty = move || store.cart().with(|items| items.is_empty());
    let total = move || store.cart().with(|items| cart::cart_total(items));

    let checkout = move |_| {
        let handoff = CheckoutHandoff::from_items(store.cart().get_untracked());
        match write_handoff(ctx.storage().as_ref(), &handoff) {
            Ok(()) => ctx.navigate(Page::Checkout),
            Err(e) => ctx.report(&e),
        }
    };

    let clear = move |_| {
        if let Err(e) = cart_store.with_value(|s| s.clear()) {
            ctx.report(&e);
        }
    };

    view! {
        <section class="cart-page">
            <h2>"Your Cart"</h2>
            <Show
                when=move || !is_empty()
                fallback=move || view! {
                    <div class="empty">
                        <p>"Your cart is empty"</p>
                        <button on:click=move |_| ctx.navigate(Page::Shop)>"Browse products"</button>
                    </div>
                }
            >
                <ul class="cart-items">
                    <For
                        each=move || store.cart().get()
                        key=|item| (item.item_id.clone(), item.quantity)
                        children=move |item| {
                            let id = item.item_id.clone();
                            let remove_id = item.item_id.clone();
                            let on_change = move |quantity: i64| {
                                if let Err(e) = cart_store.with_value(|s| s.set_quantity(&id, quantity)) {
                                    ctx.report(&e);
                                }
                            };
                            let remove = move |_| {
                                if let Err(e) = cart_store.with_value(|s| s.remove(&remove_id)) {
                                    ctx.report(&e);
                                }
                            };
                            view! {
                                <li class="cart-item">
                                    <span class="item-name">{item.name.clone()}</span>
                                    <span class="item-price">{format_price(item.price)}</span>
                                    <QuantityStepper quantity=item.quantity on_change=on_change />
                                    <span class="line-total">{format_price(item.line_total())}</span>
                                    <button class="remove-btn" title="Remove" on:click=remove>"✕"</button>
                                </li>
                            }
                        }
                    />
                </ul>
                <div class="cart-summary">
                    <span class="cart-total">"Total: " {move || format_price(total())}</span>
                    <div class="cart-actions">
                        <button class="secondary" on:click=clear>"Clear"</button>
                        <button class="secondary" on:click=move |_| ctx.navigate(Page::SharedCart)>
                            "Split with friends"
                        </button>
                        <button class="primary" on:click=checkout>"Checkout"</button>
                    </div>
                </div>
            </Show>
        </section>
    }
}
