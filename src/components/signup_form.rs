//! Signup Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::login_form::complete_sign_in;
use crate::api::{use_api, SignupRequest};
use crate::context::{use_app_context, Page};
use crate::error::AppResult;
use crate::store::use_app_store;
use crate::validation;

/// Account types the backend accepts
const ACCOUNT_TYPES: &[(&str, &str)] = &[("customer", "Customer"), ("shopkeeper", "Shopkeeper")];

/// Raw form values
#[derive(Debug, Clone, Default)]
struct SignupForm {
    name: String,
    email: String,
    password: String,
    confirm: String,
    username: String,
    phone: String,
    account_type: String,
}

impl SignupForm {
    fn validate(&self) -> AppResult<SignupRequest> {
        let name = validation::required("Name", &self.name)?.to_string();
        let email = validation::email(&self.email)?.to_string();
        validation::password(&self.password, Some(&self.confirm))?;
        let account_type = validation::required("Account type", &self.account_type)?.to_string();
        Ok(SignupRequest {
            name,
            email,
            password: self.password.clone(),
            username: validation::optional(&self.username),
            phone: validation::optional(&self.phone),
            account_type,
        })
    }
}

/// One text input bound to one form field
fn text_field(
    form: RwSignal<SignupForm>,
    input_type: &'static str,
    placeholder: &'static str,
    get: fn(&SignupForm) -> &String,
    set: fn(&mut SignupForm, String),
) -> impl IntoView {
    view! {
        <input
            type=input_type
            placeholder=placeholder
            prop:value=move || form.with(|f| get(f).clone())
            on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
        />
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = use_api();

    let form = RwSignal::new(SignupForm {
        account_type: ACCOUNT_TYPES[0].0.to_string(),
        ..Default::default()
    });
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(SignupForm::validate) {
            Ok(request) => request,
            Err(e) => return ctx.report(&e),
        };
        let api = api.get_value();
        set_busy.set(true);
        spawn_local(async move {
            match api.signup(&request).await {
                Ok(session) => complete_sign_in(ctx, store, session),
                Err(e) => ctx.report(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="auth-page">
            <h2>"Create an account"</h2>
            <form class="auth-form" on:submit=submit>
                {text_field(form, "text", "Full name", |f| &f.name, |f, v| f.name = v)}
                {text_field(form, "email", "Email", |f| &f.email, |f, v| f.email = v)}
                {text_field(form, "text", "Username (optional)", |f| &f.username, |f, v| f.username = v)}
                {text_field(form, "tel", "Phone (optional)", |f| &f.phone, |f, v| f.phone = v)}
                {text_field(form, "password", "Password", |f| &f.password, |f, v| f.password = v)}
                {text_field(form, "password", "Confirm password", |f| &f.confirm, |f, v| f.confirm = v)}
                <select
                    class="account-type"
                    prop:value=move || form.with(|f| f.account_type.clone())
                    on:change=move |ev| form.update(|f| f.account_type = event_target_value(&ev))
                >
                    {ACCOUNT_TYPES.iter().map(|&(value, label)| view! {
                        <option value=value>{label}</option>
                    }).collect_view()}
                </select>
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <p class="auth-switch">
                "Already have an account? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Page::Login);
                }>"Log in"</a>
            </p>
        </section>
    }
}
