//! Login Page
//!
//! Sign-in and registration tabs. Visitors who already hold a token are sent
//! to the dashboard before anything renders.

use bizanalytics::auth::{FormOutcome, LoginForm, RegistrationForm};
use bizanalytics::pages::{AuthTab, Navigator, Page, SubmitButton};
use leptos::*;
use wasm_bindgen::JsCast;

use crate::components::{Footer, Nav};
use crate::state::{AppContext, BrowserNavigator};

fn current_tab() -> AuthTab {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| AuthTab::from_hash(&hash))
        .unwrap_or_default()
}

/// Tab named by `attr` on the element whose handler is running
fn clicked_tab(ev: &ev::MouseEvent, attr: &str) -> Option<AuthTab> {
    ev.current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.get_attribute(attr))
        .and_then(|name| AuthTab::from_name(&name))
}

fn follow(outcome: &FormOutcome) {
    if let Some(redirect) = outcome.redirect() {
        BrowserNavigator.navigate(redirect);
    }
}

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    if !ctx.enter(Page::Login) {
        return view! { <div class="redirecting" /> }.into_view();
    }

    let tab = create_rw_signal(current_tab());

    // The Register nav link only changes the fragment while on this page
    let _ = window_event_listener(ev::hashchange, move |_| tab.set(current_tab()));

    let panel_class = move |panel: AuthTab| {
        move || {
            if tab.get() == panel {
                "auth-panel"
            } else {
                "auth-panel hidden"
            }
        }
    };

    view! {
        <Nav />

        <main class="auth-page">
            <div class="auth-card">
                <div class="auth-tabs">
                    <TabButton tab=AuthTab::Login active=tab label="Sign in" />
                    <TabButton tab=AuthTab::Register active=tab label="Create account" />
                </div>

                <div id=AuthTab::Login.panel_id() class=panel_class(AuthTab::Login)>
                    <LoginPanel tab=tab />
                </div>
                <div id=AuthTab::Register.panel_id() class=panel_class(AuthTab::Register)>
                    <RegisterPanel tab=tab />
                </div>
            </div>
        </main>

        <Footer />
    }
    .into_view()
}

#[component]
fn TabButton(tab: AuthTab, active: RwSignal<AuthTab>, label: &'static str) -> impl IntoView {
    view! {
        <button
            type="button"
            data-tab=tab.name()
            class=move || if active.get() == tab { "auth-tab active" } else { "auth-tab" }
            on:click=move |ev: ev::MouseEvent| {
                active.set(clicked_tab(&ev, "data-tab").unwrap_or(tab))
            }
        >
            {label}
        </button>
    }
}

/// "Don't have an account?" style link to the other tab
#[component]
fn SwitchLink(to: AuthTab, active: RwSignal<AuthTab>, children: Children) -> impl IntoView {
    view! {
        <a
            href=format!("#{}", to.name())
            data-switch=to.name()
            on:click=move |ev: ev::MouseEvent| {
                ev.prevent_default();
                active.set(clicked_tab(&ev, "data-switch").unwrap_or(to));
            }
        >
            {children()}
        </a>
    }
}

#[component]
fn SubmitControl(state: RwSignal<SubmitButton>) -> impl IntoView {
    view! {
        <button
            type="submit"
            class="btn btn-primary btn-block"
            disabled=move || state.with(SubmitButton::disabled)
        >
            {move || state.with(|b| b.text().to_string())}
        </button>
    }
}

/// Inline error and success lines under a form
#[component]
fn FormMessage(prefix: &'static str, outcome: RwSignal<Option<FormOutcome>>) -> impl IntoView {
    let error = move || {
        outcome.with(|o| match o {
            Some(FormOutcome::Failure(message)) => Some(message.clone()),
            _ => None,
        })
    };
    let success = move || {
        outcome.with(|o| match o {
            Some(FormOutcome::Success { message, .. }) => Some(message.clone()),
            _ => None,
        })
    };

    view! {
        <p
            id=format!("{}-error", prefix)
            class=move || if error().is_some() { "form-error" } else { "form-error hidden" }
        >
            {move || error().unwrap_or_default()}
        </p>
        <p
            id=format!("{}-success", prefix)
            class=move || if success().is_some() { "form-success" } else { "form-success hidden" }
        >
            {move || success().unwrap_or_default()}
        </p>
    }
}

#[component]
fn LoginPanel(tab: RwSignal<AuthTab>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let button = create_rw_signal(SubmitButton::new("Sign in"));
    let outcome = create_rw_signal(None::<FormOutcome>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if button.with(SubmitButton::is_loading) {
            return;
        }

        let form = LoginForm::new(email.get(), password.get());
        let ctx = ctx.clone();
        outcome.set(None);
        button.update(|b| b.set_loading(true));

        spawn_local(async move {
            let result = ctx.flows().login(&form).await;
            ctx.sync();
            button.update(|b| b.set_loading(false));
            follow(&result);
            outcome.set(Some(result));
        });
    };

    view! {
        <form id="login-form" class="auth-form" on:submit=on_submit novalidate=true>
            <label>
                "Email"
                <input
                    type="email"
                    name="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    name="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>

            <FormMessage prefix="login" outcome=outcome />
            <SubmitControl state=button />

            <p class="auth-switch">
                "New here? "
                <SwitchLink to=AuthTab::Register active=tab>"Create an account"</SwitchLink>
            </p>
        </form>
    }
}

#[component]
fn RegisterPanel(tab: RwSignal<AuthTab>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let full_name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let password_confirm = create_rw_signal(String::new());
    let button = create_rw_signal(SubmitButton::new("Create account"));
    let outcome = create_rw_signal(None::<FormOutcome>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if button.with(SubmitButton::is_loading) {
            return;
        }

        let form = RegistrationForm {
            full_name: full_name.get(),
            email: email.get(),
            password: password.get(),
            password_confirm: password_confirm.get(),
        };
        let ctx = ctx.clone();
        outcome.set(None);
        button.update(|b| b.set_loading(true));

        spawn_local(async move {
            let result = ctx.flows().register(&form).await;
            ctx.sync();
            button.update(|b| b.set_loading(false));
            follow(&result);
            outcome.set(Some(result));
        });
    };

    view! {
        <form id="register-form" class="auth-form" on:submit=on_submit novalidate=true>
            <label>
                "Full name"
                <input
                    type="text"
                    name="full_name"
                    autocomplete="name"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Email"
                <input
                    type="email"
                    name="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    name="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Confirm password"
                <input
                    type="password"
                    name="password_confirm"
                    autocomplete="new-password"
                    prop:value=move || password_confirm.get()
                    on:input=move |ev| password_confirm.set(event_target_value(&ev))
                />
            </label>

            <FormMessage prefix="register" outcome=outcome />
            <SubmitControl state=button />

            <p class="auth-switch">
                "Already registered? "
                <SwitchLink to=AuthTab::Login active=tab>"Sign in"</SwitchLink>
            </p>
        </form>
    }
}
