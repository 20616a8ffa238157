//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::GoogleSignIn;
use crate::api::{use_api, LoginRequest};
use crate::context::{use_app_context, AppContext, Page};
use crate::error::AppResult;
use crate::models::AuthSession;
use crate::storage::save_session;
use crate::store::{use_app_store, AppStateStoreFields, AppStore};
use crate::validation;

/// Persist a fresh session and land on the shop
pub(crate) fn complete_sign_in(ctx: AppContext, store: AppStore, session: AuthSession) {
    if let Err(e) = save_session(ctx.storage().as_ref(), &session) {
        ctx.report(&e);
        return;
    }
    log::info!("[AUTH] Signed in as {}", session.user.email);
    ctx.success(format!("Welcome, {}", session.user.name));
    store.profile().set(Some(session.user));
    ctx.navigate(Page::Shop);
}

fn login_request(email: &str, password: &str) -> AppResult<LoginRequest> {
    let email = validation::email(email)?.to_string();
    validation::required("Password", password)?;
    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match login_request(&email.get_untracked(), &password.get_untracked()) {
            Ok(request) => request,
            Err(e) => return ctx.report(&e),
        };
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            match api.login(&request).await {
                Ok(session) => complete_sign_in(ctx, store, session),
                Err(e) => ctx.report(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="auth-page">
            <h2>"Log in"</h2>
            <form class="auth-form" on:submit=submit>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
            <div class="auth-divider">"or"</div>
            <GoogleSignIn on_session=move |session| complete_sign_in(ctx, store, session) />
            <p class="auth-switch">
                "New here? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Page::Signup);
                }>"Create an account"</a>
            </p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_login_request_trims_email() {
        let request = login_request(" asha@example.com ", "secret").unwrap();
        assert_eq!(request.email, "asha@example.com");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_login_request_requires_password() {
        assert_eq!(
            login_request("asha@example.com", "").unwrap_err(),
            AppError::Validation("Password is required".to_string())
        );
    }
}
