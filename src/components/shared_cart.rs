//! Shared Cart Page
//!
//! Create a server-held cart from the local one, or join an existing
//! cart by code. Every item carries the contributor who added it, so
//! the split table can show who owes what.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{QuantityStepper, SplitTable};
use crate::api::{use_api, CartSessionApi};
use crate::cart::{self, stamp_contributor};
use crate::context::{use_app_context, Page};
use crate::error::AppError;
use crate::models::{format_price, Contributor, LineItem, SharedCartSession};
use crate::payment::{PaymentChannel, PaymentInitiator, Prefill, RazorpayWidget};
use crate::store::{use_app_store, use_cart_store, AppStateStoreFields};
use crate::validation;

#[component]
pub fn SharedCartPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = use_api();
    let cart_store = use_cart_store();

    let (session, set_session) = signal(None::<SharedCartSession>);
    let (join_code, set_join_code) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let (refresh, set_refresh) = signal(0u32);

    // Fetch whenever the code changes or after a write
    Effect::new(move |_| {
        let _ = refresh.get();
        let Some(code) = store.shared_code().get() else {
            set_session.set(None);
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            match api.fetch_session(&code).await {
                Ok(loaded) => {
                    log::debug!("[SHARED] {} has {} items", loaded.code, loaded.items.len());
                    set_session.set(Some(loaded));
                }
                Err(e) => {
                    if matches!(e, AppError::NotFound(_)) {
                        store.shared_code().set(None);
                    }
                    ctx.report(&e);
                }
            }
        });
    });

    // The signed-in user, as stamped on items they contribute
    let me = move || -> Result<Contributor, AppError> {
        store
            .profile()
            .with_untracked(|p| p.as_ref().map(|p| p.contributor()))
            .ok_or(AppError::Unauthorized)
    };

    let my_items = move |me: &Contributor| -> Vec<LineItem> {
        stamp_contributor(&cart_store.with_value(|s| s.items()), me)
    };

    let create = move |_| {
        let me = match me() {
            Ok(me) => me,
            Err(e) => return ctx.report(&e),
        };
        let items = my_items(&me);
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            match api.create_session(&items, Some(&me)).await {
                Ok(code) => {
                    ctx.success(format!("Shared cart {} created", code));
                    store.shared_code().set(Some(code));
                }
                Err(e) => ctx.report(&e),
            }
            set_busy.set(false);
        });
    };

    let join = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let prepared = validation::cart_code(&join_code.get_untracked()).and_then(|code| Ok((code, me()?)));
        let (code, me) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return ctx.report(&e),
        };
        let items = my_items(&me);
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            match api.join_session(&code, &items).await {
                Ok(()) => {
                    set_join_code.set(String::new());
                    ctx.success(format!("Joined shared cart {}", code));
                    store.shared_code().set(Some(code));
                }
                Err(e) => ctx.report(&e),
            }
            set_busy.set(false);
        });
    };

    let update = move |item_id: String, quantity: i64| {
        let Some(code) = store.shared_code().get_untracked() else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            match api.update_quantity(&code, &item_id, quantity).await {
                Ok(()) => set_refresh.update(|n| *n += 1),
                Err(e) => ctx.report(&e),
            }
        });
    };

    let settle = move |_| {
        let Some(current) = session.get_untracked() else {
            return;
        };
        let total = cart::cart_total(&current.items);
        let prefill = store
            .profile()
            .with_untracked(|p| p.as_ref().map(Prefill::from))
            .unwrap_or_default();
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            let widget = RazorpayWidget;
            let description = format!("Shared cart {}", current.code);
            let result = PaymentInitiator::new(&api, &widget, api.config())
                .settle(PaymentChannel::Order, total, &description, prefill)
                .await;
            set_busy.set(false);
            match result {
                Ok(_) => {
                    if let Err(e) = cart_store.with_value(|s| s.complete_checkout()) {
                        ctx.report(&e);
                    }
                    ctx.success("Shared cart paid");
                    store.shared_code().set(None);
                    ctx.navigate(Page::History);
                }
                Err(AppError::Cancelled) => {
                    log::info!("[SHARED] Payment window closed");
                    ctx.info("Payment cancelled");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    let leave = move |_| store.shared_code().set(None);

    let start_panel = move || {
        view! {
            <div class="shared-start">
                <div class="shared-create">
                    <p>"Start a shared cart from the items in your cart and send the code to your friends."</p>
                    <button class="primary" disabled=move || busy.get() on:click=create>
                        "Create shared cart"
                    </button>
                </div>
                <form class="shared-join" on:submit=join>
                    <input
                        type="text"
                        placeholder="Enter cart code"
                        prop:value=move || join_code.get()
                        on:input=move |ev| set_join_code.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Join"</button>
                </form>
            </div>
        }
    };

    let session_panel = move |current: SharedCartSession| {
        let total = cart::cart_total(&current.items);
        let split_items = Signal::derive(move || session.with(|s| s.as_ref().map(|s| s.items.clone()).unwrap_or_default()));
        view! {
            <div class="shared-session">
                <div class="shared-header">
                    <span class="shared-code">"Code: " <strong>{current.code.clone()}</strong></span>
                    <button class="secondary" on:click=move |_| set_refresh.update(|n| *n += 1)>"Refresh"</button>
                    <button class="secondary" on:click=leave>"Leave"</button>
                </div>
                <ul class="cart-items">
                    {current.items.into_iter().map(|item| {
                        let item_id = item.item_id.clone();
                        let added_by = item
                            .added_by
                            .as_ref()
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "Unassigned".to_string());
                        view! {
                            <li class="cart-item">
                                <span class="item-name">{item.name.clone()}</span>
                                <span class="item-owner">{added_by}</span>
                                <QuantityStepper
                                    quantity=item.quantity
                                    on_change=move |quantity| update(item_id.clone(), quantity)
                                    disabled=busy
                                />
                                <span class="line-total">{format_price(item.line_total())}</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
                <h3>"Split"</h3>
                <SplitTable items=split_items />
                <div class="cart-summary">
                    <span class="cart-total">"Total: " {format_price(total)}</span>
                    <button class="primary" disabled=move || { busy.get() || total <= 0.0 } on:click=settle>
                        "Pay for everyone"
                    </button>
                </div>
            </div>
        }
    };

    view! {
        <section class="shared-cart-page">
            <h2>"Shared Cart"</h2>
            {move || match (store.shared_code().get(), session.get()) {
                (None, _) => start_panel().into_any(),
                (Some(_), None) => view! { <p class="loading">"Loading shared cart..."</p> }.into_any(),
                (Some(_), Some(current)) => session_panel(current).into_any(),
            }}
        </section>
    }
}
