//! Shop Analysis Page
//!
//! Sales summary for shopkeeper accounts.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::context::use_app_context;
use crate::models::{format_price, ShopAnalysis};

#[component]
pub fn ShopAnalysisPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();

    let (analysis, set_analysis) = signal(None::<ShopAnalysis>);

    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.shop_analysis().await {
                Ok(loaded) => set_analysis.set(Some(loaded)),
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <section class="analysis-page">
            <h2>"Shop Analysis"</h2>
            {move || match analysis.get() {
                None => view! { <p class="loading">"Loading report..."</p> }.into_any(),
                Some(report) => view! {
                    <div class="analysis-cards">
                        <div class="stat-card">
                            <span class="stat-label">"Orders"</span>
                            <span class="stat-value">{report.total_orders}</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-label">"Revenue"</span>
                            <span class="stat-value">{format_price(report.total_revenue)}</span>
                        </div>
                    </div>
                    <table class="top-items">
                        <thead>
                            <tr>
                                <th>"Item"</th>
                                <th>"Sold"</th>
                                <th class="amount">"Revenue"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {report.top_items.into_iter().map(|item| view! {
                                <tr>
                                    <td>{item.name}</td>
                                    <td>{item.quantity}</td>
                                    <td class="amount">{format_price(item.revenue)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </section>
    }
}
