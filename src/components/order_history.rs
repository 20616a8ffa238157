//! Order History Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::context::{use_app_context, Page};
use crate::models::{format_price, format_timestamp, PaymentRecord};
use crate::store::use_cart_store;

#[component]
pub fn OrderHistoryPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let cart_store = use_cart_store();

    let (records, set_records) = signal(Vec::<PaymentRecord>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.payment_history().await {
                Ok(loaded) => set_records.set(loaded),
                Err(e) => ctx.report(&e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <section class="history-page">
            <h2>"Your Orders"</h2>
            <Show when=move || !loading.get() && records.with(|r| r.is_empty())>
                <p class="empty">"No orders yet"</p>
            </Show>
            <ul class="history-list">
                <For
                    each=move || records.get()
                    key=|record| record.order_id.clone()
                    children=move |record| {
                        let when = record.created_at.as_deref().map(format_timestamp).unwrap_or_default();
                        let status_class = format!("status {}", record.status.to_lowercase());
                        let reorder_items = record.items.clone();
                        let has_items = !reorder_items.is_empty();
                        let reorder = move |_| {
                            match cart_store.with_value(|s| s.replace(reorder_items.clone())) {
                                Ok(()) => ctx.navigate(Page::Cart),
                                Err(e) => ctx.report(&e),
                            }
                        };
                        view! {
                            <li class="history-entry">
                                <div class="history-head">
                                    <span class="order-id">{record.order_id.clone()}</span>
                                    <span class=status_class>{record.status.clone()}</span>
                                </div>
                                <div class="history-meta">
                                    <span class="history-when">{when}</span>
                                    <span class="history-amount">{format_price(record.amount)}</span>
                                </div>
                                <ul class="history-items">
                                    {record.items.iter().map(|item| view! {
                                        <li>{item.name.clone()} " × " {item.quantity}</li>
                                    }).collect_view()}
                                </ul>
                                {has_items.then(|| view! {
                                    <button class="secondary reorder-btn" on:click=reorder>"Order again"</button>
                                })}
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
