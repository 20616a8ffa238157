//! Google Sign-In Button
//!
//! Binds Google Identity Services (loaded by `index.html`). The ID
//! token it hands back is exchanged for a backend session.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::api::use_api;
use crate::config::AppConfig;
use crate::context::use_app_context;
use crate::error::AppError;
use crate::models::AuthSession;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize, catch)]
    fn gsi_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = prompt, catch)]
    fn gsi_prompt() -> Result<(), JsValue>;
}

/// `response.credential` from the GSI callback
fn credential_of(response: &JsValue) -> Option<String> {
    js_sys::Reflect::get(response, &"credential".into())
        .ok()
        .and_then(|c| c.as_string())
}

#[component]
pub fn GoogleSignIn(#[prop(into)] on_session: Callback<AuthSession>) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let client_id = expect_context::<AppConfig>().google_client_id;
    let enabled = client_id.is_some();
    let client_id = StoredValue::new(client_id);

    let start = move |_| {
        let Some(client_id) = client_id.get_value() else {
            return;
        };

        let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
            let Some(credential) = credential_of(&response) else {
                ctx.report(&AppError::Rejected("Google sign-in was not completed".to_string()));
                return;
            };
            spawn_local(async move {
                match api.get_value().google_login(&credential).await {
                    Ok(session) => on_session.run(session),
                    Err(e) => ctx.report(&e),
                }
            });
        });

        let config = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&config, &"client_id".into(), &JsValue::from(client_id));
        let _ = js_sys::Reflect::set(&config, &"callback".into(), callback.as_ref());
        // GSI keeps the callback for the page's lifetime
        callback.forget();

        if let Err(e) = gsi_initialize(&config).and_then(|_| gsi_prompt()) {
            log::error!("[AUTH] Google Identity Services unavailable: {:?}", e);
            ctx.report(&AppError::Network("Google sign-in is unavailable".to_string()));
        }
    };

    view! {
        <Show when=move || enabled>
            <button type="button" class="google-btn" on:click=start>
                "Continue with Google"
            </button>
        </Show>
    }
}
