//! Navigation Bar Component

use leptos::prelude::*;

use super::ThemeToggle;
use crate::cart;
use crate::context::{use_app_context, Page};
use crate::store::{use_app_store, AppStateStoreFields};

/// The cart link carries a count badge once the cart has items
fn shows_badge(page: Page, count: i64) -> bool {
    page == Page::Cart && count > 0
}

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let badge = move || store.cart().with(|items| cart::item_count(items));

    view! {
        <nav class="nav-bar">
            <span class="brand" on:click=move |_| ctx.navigate(Page::Shop)>"QuickCart"</span>
            <div class="nav-links">
                {Page::NAV.iter().map(|&page| {
                    view! {
                        <button
                            class=move || if ctx.page.get() == page { "nav-link active" } else { "nav-link" }
                            on:click=move |_| ctx.navigate(page)
                        >
                            {page.label()}
                            <Show when=move || shows_badge(page, badge())>
                                <span class="cart-badge">{badge}</span>
                            </Show>
                        </button>
                    }
                }).collect_view()}
            </div>
            <div class="nav-actions">
                <ThemeToggle />
                {move || match store.profile().get() {
                    Some(profile) => view! {
                        <button class="nav-user" on:click=move |_| ctx.navigate(Page::Profile)>
                            {profile.name}
                        </button>
                    }.into_any(),
                    None => view! {
                        <button class="nav-login" on:click=move |_| ctx.navigate(Page::Login)>
                            "Log in"
                        </button>
                    }.into_any(),
                }}
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_only_on_cart_link() {
        assert!(shows_badge(Page::Cart, 3));
        assert!(!shows_badge(Page::Cart, 0));
        assert!(!shows_badge(Page::Shop, 3));
    }
}
