//! Shop Page
//!
//! Catalog of every store's products with a name/category filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{catalog, use_api};
use crate::context::use_app_context;
use crate::models::{format_price, Product};
use crate::store::use_cart_store;

fn matches(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || product.name.to_lowercase().contains(&query)
        || product
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query))
}

#[component]
pub fn ShopPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let cart_store = use_cart_store();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (query, set_query) = signal(String::new());

    // Load catalog on mount
    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.stores().await {
                Ok(stores) => {
                    let loaded = catalog(&stores);
                    log::info!("[SHOP] Loaded {} products from {} stores", loaded.len(), stores.len());
                    set_products.set(loaded);
                }
                Err(e) => ctx.report(&e),
            }
            set_loading.set(false);
        });
    });

    let add_to_cart = move |product: Product| {
        match cart_store.with_value(|store| store.add(product.to_line_item())) {
            Ok(()) => ctx.success(format!("Added {} to cart", product.name)),
            Err(e) => ctx.report(&e),
        }
    };

    let visible = move || {
        let query = query.get();
        products
            .get()
            .into_iter()
            .filter(|p| matches(p, &query))
            .collect::<Vec<_>>()
    };

    view! {
        <section class="shop-page">
            <input
                type="search"
                class="search-input"
                placeholder="Search products..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            <Show when=move || loading.get()>
                <p class="loading">"Loading products..."</p>
            </Show>
            <Show when=move || !loading.get() && visible().is_empty()>
                <p class="empty">"No products found"</p>
            </Show>
            <div class="product-grid">
                <For
                    each=visible
                    key=|product| product.id.clone()
                    children=move |product| {
                        let out_of_stock = product.stock.is_some_and(|s| s <= 0);
                        let image = product.image.clone();
                        let category = product.category.clone();
                        let name = product.name.clone();
                        let price = product.price;
                        view! {
                            <div class="product-card">
                                {image.map(|src| view! { <img class="product-image" src=src alt="" /> })}
                                <div class="product-name">{name}</div>
                                {category.map(|c| view! { <div class="product-category">{c}</div> })}
                                <div class="product-price">{format_price(price)}</div>
                                <button
                                    class="add-btn"
                                    disabled=out_of_stock
                                    on:click=move |_| add_to_cart(product.clone())
                                >
                                    {if out_of_stock { "Out of stock" } else { "Add to cart" }}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: Option<&str>) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            price: 10.0,
            category: category.map(str::to_string),
            image: None,
            store_id: None,
            stock: None,
        }
    }

    #[test]
    fn test_filter_by_name_or_category() {
        let rice = product("Basmati Rice", Some("Grains"));
        assert!(matches(&rice, ""));
        assert!(matches(&rice, "rice"));
        assert!(matches(&rice, " GRAIN "));
        assert!(!matches(&rice, "oil"));
        assert!(!matches(&product("Oil", None), "grain"));
    }
}
