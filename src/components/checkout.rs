//! Checkout Page
//!
//! Pays for the cart snapshot handed off by the cart page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::context::{use_app_context, Page};
use crate::error::AppError;
use crate::models::format_price;
use crate::payment::{PaymentChannel, PaymentInitiator, Prefill, RazorpayWidget};
use crate::storage::read_handoff;
use crate::store::{use_app_store, use_cart_store, AppStateStoreFields};

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = use_api();
    let cart_store = use_cart_store();

    let handoff = StoredValue::new(read_handoff(ctx.storage().as_ref()));
    let (paying, set_paying) = signal(false);

    let pay = move |_| {
        let Some(handoff) = handoff.get_value() else {
            return;
        };
        let prefill = store
            .profile()
            .with_untracked(|p| p.as_ref().map(Prefill::from))
            .unwrap_or_default();
        let api = api.get_value();
        set_paying.set(true);

        spawn_local(async move {
            let widget = RazorpayWidget;
            let initiator = PaymentInitiator::new(&api, &widget, api.config());
            let result = initiator
                .settle(PaymentChannel::Order, handoff.total, "Order payment", prefill)
                .await;
            set_paying.set(false);

            match result {
                Ok(receipt) => {
                    log::info!("[CHECKOUT] Paid order {}", receipt.order_id);
                    if let Err(e) = cart_store.with_value(|s| s.complete_checkout()) {
                        ctx.report(&e);
                    }
                    ctx.success(receipt.message.unwrap_or_else(|| "Payment successful".to_string()));
                    ctx.navigate(Page::History);
                }
                Err(AppError::Cancelled) => {
                    log::info!("[CHECKOUT] Payment window closed");
                    ctx.info("Payment cancelled");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    view! {
        <section class="checkout-page">
            <h2>"Checkout"</h2>
            {move || match handoff.get_value() {
                None => view! {
                    <div class="empty">
                        <p>"Nothing to check out"</p>
                        <button on:click=move |_| ctx.navigate(Page::Shop)>"Back to shop"</button>
                    </div>
                }.into_any(),
                Some(snapshot) => view! {
                    <ul class="checkout-items">
                        {snapshot.items.into_iter().map(|item| view! {
                            <li class="checkout-item">
                                <span class="item-name">{item.name.clone()}</span>
                                <span class="item-qty">"× " {item.quantity}</span>
                                <span class="line-total">{format_price(item.line_total())}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                    <div class="checkout-summary">
                        <span class="cart-total">"Total: " {format_price(snapshot.total)}</span>
                        <button class="primary" disabled=move || paying.get() on:click=pay>
                            {move || if paying.get() { "Processing..." } else { "Pay now" }}
                        </button>
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
