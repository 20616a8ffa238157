//! Quantity Stepper Component
//!
//! `-` / `+` pair that never emits a quantity below one.

use leptos::prelude::*;

use crate::cart::MIN_QUANTITY;

#[component]
pub fn QuantityStepper(
    quantity: i64,
    #[prop(into)] on_change: Callback<i64>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="qty-stepper">
            <button
                class="qty-btn"
                disabled=move || { disabled.get() || quantity <= MIN_QUANTITY }
                on:click=move |_| on_change.run((quantity - 1).max(MIN_QUANTITY))
            >
                "−"
            </button>
            <span class="qty">{quantity}</span>
            <button
                class="qty-btn"
                disabled=move || disabled.get()
                on:click=move |_| on_change.run(quantity + 1)
            >
                "+"
            </button>
        </div>
    }
}
