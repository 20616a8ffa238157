//! Stores & Drivers Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::context::use_app_context;
use crate::models::{Driver, Store};

#[component]
pub fn DirectoryPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();

    let (stores, set_stores) = signal(Vec::<Store>::new());
    let (drivers, set_drivers) = signal(Vec::<Driver>::new());

    // Both lists load independently
    Effect::new(move |_| {
        let stores_api = api.get_value();
        spawn_local(async move {
            match stores_api.stores().await {
                Ok(loaded) => set_stores.set(loaded),
                Err(e) => ctx.report(&e),
            }
        });
        let drivers_api = api.get_value();
        spawn_local(async move {
            match drivers_api.drivers().await {
                Ok(loaded) => set_drivers.set(loaded),
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <section class="directory-page">
            <div class="directory-column">
                <h2>"Stores"</h2>
                <ul class="directory-list">
                    <For
                        each=move || stores.get()
                        key=|store| store.id.clone()
                        children=|store| view! {
                            <li class="directory-entry">
                                <span class="entry-name">{store.name}</span>
                                {store.address.map(|a| view! { <span class="entry-detail">{a}</span> })}
                                {store.phone.map(|p| view! { <span class="entry-detail">{p}</span> })}
                                <span class="entry-detail">{store.products.len()} " products"</span>
                            </li>
                        }
                    />
                </ul>
            </div>
            <div class="directory-column">
                <h2>"Drivers"</h2>
                <ul class="directory-list">
                    <For
                        each=move || drivers.get()
                        key=|driver| driver.id.clone()
                        children=|driver| {
                            let (badge_class, badge_label) = if driver.available {
                                ("badge available", "Available")
                            } else {
                                ("badge busy", "On delivery")
                            };
                            view! {
                                <li class="directory-entry">
                                    <span class="entry-name">{driver.name}</span>
                                    {driver.vehicle.map(|v| view! { <span class="entry-detail">{v}</span> })}
                                    {driver.phone.map(|p| view! { <span class="entry-detail">{p}</span> })}
                                    <span class=badge_class>{badge_label}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </section>
    }
}
