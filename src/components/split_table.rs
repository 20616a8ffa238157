//! Split Table Component
//!
//! Who owes what for a shared cart. Items nobody claimed are listed as
//! unassigned rather than split.

use leptos::prelude::*;

use crate::models::{format_price, LineItem};
use crate::split::split_by_contributor;

#[component]
pub fn SplitTable(#[prop(into)] items: Signal<Vec<LineItem>>) -> impl IntoView {
    let split = Memo::new(move |_| items.with(|items| split_by_contributor(items)));
    let unassigned = move || {
        items.with(|items| {
            items
                .iter()
                .filter(|item| item.added_by.is_none())
                .map(LineItem::line_total)
                .fold(0.0, |acc, x| acc + x)
        })
    };
    let has_unassigned = move || items.with(|items| items.iter().any(|item| item.added_by.is_none()));

    view! {
        <table class="split-table">
            <thead>
                <tr>
                    <th>"Contributor"</th>
                    <th>"Items"</th>
                    <th class="amount">"Owes"</th>
                </tr>
            </thead>
            <tbody>
                {move || split.get().entries().iter().map(|entry| {
                    let items = entry
                        .items
                        .iter()
                        .map(|item| format!("{} × {}", item.name, item.quantity))
                        .collect::<Vec<_>>()
                        .join(", ");
                    view! {
                        <tr>
                            <td>{entry.contributor.name.clone()}</td>
                            <td class="split-items">{items}</td>
                            <td class="amount">{format_price(entry.subtotal)}</td>
                        </tr>
                    }
                }).collect_view()}
                <Show when=has_unassigned>
                    <tr class="unassigned">
                        <td>"Unassigned"</td>
                        <td></td>
                        <td class="amount">{move || format_price(unassigned())}</td>
                    </tr>
                </Show>
            </tbody>
        </table>
    }
}
