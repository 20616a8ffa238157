//! Profile Page
//!
//! Account details, sign-out and the recent client log for support.

use leptos::prelude::*;

use crate::context::{use_app_context, Page};
use crate::storage::clear_session;
use crate::store::{use_app_store, AppStateStoreFields};

const RECENT_LOG_LINES: usize = 50;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (show_log, set_show_log) = signal(false);

    let logout = move |_| {
        clear_session(ctx.storage().as_ref());
        store.profile().set(None);
        store.wallet_balance().set(None);
        store.shared_code().set(None);
        log::info!("[AUTH] Signed out");
        ctx.success("Signed out");
        ctx.navigate(Page::Shop);
    };

    let recent_log = move || {
        let records = ring_logger::recent();
        let skip = records.len().saturating_sub(RECENT_LOG_LINES);
        records
            .iter()
            .skip(skip)
            .map(|record| record.render())
            .collect::<Vec<_>>()
            .join("\n")
    };

    view! {
        <section class="profile-page">
            <h2>"Profile"</h2>
            {move || store.profile().get().map(|profile| view! {
                <dl class="profile-details">
                    <dt>"Name"</dt>
                    <dd>{profile.name}</dd>
                    <dt>"Email"</dt>
                    <dd>{profile.email}</dd>
                    <dt>"Account"</dt>
                    <dd>{profile.account_type}</dd>
                    {profile.username.map(|u| view! { <dt>"Username"</dt> <dd>{u}</dd> })}
                    {profile.phone.map(|p| view! { <dt>"Phone"</dt> <dd>{p}</dd> })}
                </dl>
            })}
            <div class="profile-actions">
                <button class="secondary" on:click=move |_| set_show_log.update(|v| *v = !*v)>
                    {move || if show_log.get() { "Hide activity log" } else { "Show activity log" }}
                </button>
                <button class="danger" on:click=logout>"Log out"</button>
            </div>
            <Show when=move || show_log.get()>
                <pre class="activity-log">{recent_log}</pre>
            </Show>
        </section>
    }
}
