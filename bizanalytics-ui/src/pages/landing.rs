//! Landing Page
//!
//! Intro animation over the marketing page. The page itself stays hidden
//! until the overlay is gone.

use bizanalytics::pages::{IntroState, NavLink, Page};
use leptos::*;

use crate::components::{IntroOverlay, Nav};
use crate::state::AppContext;

#[component]
pub fn Landing() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    ctx.enter(Page::Landing);

    let intro = create_rw_signal(IntroState::default());
    let logged_in = ctx.logged_in;

    let root_class = move || {
        if intro.with(|s| s.overlay_hidden) {
            "site-root"
        } else {
            "site-root hidden"
        }
    };

    // Signed-in visitors go straight to their dashboard
    let cta = move || {
        if logged_in.get() {
            (NavLink::Dashboard.href(), "Open your dashboard")
        } else {
            (NavLink::Register.href(), "Get started")
        }
    };

    view! {
        <IntroOverlay state=intro />

        <div id="site-root" class=root_class>
            <Nav />

            <section class="hero">
                <h1>"Know every outlet. Sell every item."</h1>
                <p class="hero-sub">
                    "BizAnalystics turns a year of till receipts into charts you can act on: "
                    "what sells, where it sells, and which stores pull their weight."
                </p>
                <div class="hero-actions">
                    <a class="btn btn-primary" href=move || cta().0>{move || cta().1}</a>
                    <a class="btn btn-ghost" href=NavLink::Login.href()>"Sign in"</a>
                </div>
            </section>

            <section class="features">
                <FeatureCard
                    title="Sales by outlet"
                    body="Compare supermarkets and grocery stores side by side."
                />
                <FeatureCard
                    title="Product mix"
                    body="See which of sixteen item types carry your revenue."
                />
                <FeatureCard
                    title="Store history"
                    body="Track how outlets perform by year of establishment."
                />
            </section>
        </div>
    }
}

#[component]
fn FeatureCard(title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <div class="feature-card">
            <h3>{title}</h3>
            <p>{body}</p>
        </div>
    }
}
