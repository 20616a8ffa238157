//! Wallet Page
//!
//! Balance, recent transactions and top-up through the payment flow.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::context::use_app_context;
use crate::error::AppError;
use crate::models::{format_price, format_timestamp, WalletSummary};
use crate::payment::{PaymentChannel, PaymentInitiator, Prefill, RazorpayWidget};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validation;

const QUICK_AMOUNTS: [f64; 3] = [100.0, 500.0, 1000.0];

#[component]
pub fn WalletPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = use_api();

    let (summary, set_summary) = signal(None::<WalletSummary>);
    let (amount, set_amount) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let (reload, set_reload) = signal(0u32);

    // Load wallet on mount and after each top-up
    Effect::new(move |_| {
        let _ = reload.get();
        let api = api.get_value();
        spawn_local(async move {
            match api.wallet().await {
                Ok(loaded) => {
                    store.wallet_balance().set(Some(loaded.balance));
                    set_summary.set(Some(loaded));
                }
                Err(e) => ctx.report(&e),
            }
        });
    });

    let top_up = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = match validation::amount(&amount.get_untracked()) {
            Ok(value) => value,
            Err(e) => return ctx.report(&e),
        };
        let prefill = store
            .profile()
            .with_untracked(|p| p.as_ref().map(Prefill::from))
            .unwrap_or_default();
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            let widget = RazorpayWidget;
            let result = PaymentInitiator::new(&api, &widget, api.config())
                .settle(PaymentChannel::Wallet, value, "Wallet top-up", prefill)
                .await;
            set_busy.set(false);
            match result {
                Ok(_) => {
                    ctx.success(format!("Added {} to your wallet", format_price(value)));
                    set_amount.set(String::new());
                    set_reload.update(|n| *n += 1);
                }
                Err(AppError::Cancelled) => {
                    log::info!("[WALLET] Payment window closed");
                    ctx.info("Top-up cancelled");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    view! {
        <section class="wallet-page">
            <h2>"Wallet"</h2>
            <div class="wallet-balance">
                {move || match store.wallet_balance().get() {
                    Some(balance) => format_price(balance),
                    None => "—".to_string(),
                }}
            </div>
            <form class="top-up-form" on:submit=top_up>
                <input
                    type="number"
                    min="1"
                    step="any"
                    placeholder="Amount"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                />
                {QUICK_AMOUNTS.iter().map(|&quick| view! {
                    <button type="button" class="quick-amount" on:click=move |_| set_amount.set(quick.to_string())>
                        {format_price(quick)}
                    </button>
                }).collect_view()}
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Processing..." } else { "Add money" }}
                </button>
            </form>
            <h3>"Transactions"</h3>
            {move || summary.get().map(|summary| {
                if summary.transactions.is_empty() {
                    return view! { <p class="empty">"No transactions yet"</p> }.into_any();
                }
                view! {
                    <ul class="transactions">
                        {summary.transactions.into_iter().map(|tx| {
                            let when = tx.created_at.as_deref().map(format_timestamp).unwrap_or_default();
                            let label = tx.description.clone().unwrap_or_else(|| tx.kind.clone());
                            let class = if tx.kind == "debit" { "tx debit" } else { "tx credit" };
                            view! {
                                <li class=class>
                                    <span class="tx-label">{label}</span>
                                    <span class="tx-when">{when}</span>
                                    <span class="tx-amount">{format_price(tx.amount)}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any()
            })}
        </section>
    }
}
