//! Theme Toggle Component
//!
//! Flips light/dark, persists the choice and mirrors it on `<body>`.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields, Theme};

fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force("dark", theme == Theme::Dark) {
        log::warn!("[THEME] Failed to apply theme: {:?}", e);
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    Effect::new(move |_| apply_theme(store.theme().get()));

    let toggle = move |_| {
        let next = store.theme().get_untracked().toggled();
        store.theme().set(next);
        if let Err(e) = next.save(&ctx.storage()) {
            ctx.report(&e);
        }
    };

    view! {
        <button class="theme-toggle" title="Toggle theme" on:click=toggle>
            {move || if store.theme().get() == Theme::Dark { "☀" } else { "🌙" }}
        </button>
    }
}
