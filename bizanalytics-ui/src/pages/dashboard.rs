//! Dashboard Page
//!
//! Sales charts for signed-in users. Charts are drawn shortly after the
//! section is mounted, once per page.

use bizanalytics::dashboard::{
    standard_descriptors, DashboardRenderer, Rendered, OUTLET_TABLE_ANCHOR,
};
use bizanalytics::pages::{Page, UserBadge, CHART_REVEAL_DELAY};
use leptos::*;

use crate::components::{CanvasSurface, Footer, Nav};
use crate::state::AppContext;

/// Card title for each chart anchor
fn chart_title(anchor: &str) -> &'static str {
    match anchor {
        "chart-fat" => "Sales by Fat Content",
        "chart-size" => "Sales by Outlet Size",
        "chart-location" => "Sales by Location Tier",
        "chart-item-type" => "Sales by Item Type",
        "chart-estab" => "Sales by Establishment Year",
        "chart-fat-outlet" => "Fat Content by Outlet Type",
        _ => "",
    }
}

/// Wide cards span two grid columns
fn is_wide(anchor: &str) -> bool {
    matches!(anchor, "chart-item-type" | "chart-estab" | "chart-fat-outlet")
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    if !ctx.enter(Page::Dashboard) {
        return view! { <div class="redirecting" /> }.into_view();
    }

    let badge = UserBadge::from_profile(ctx.session.user().as_ref());
    let renderer = store_value(DashboardRenderer::default());

    let section_ref = create_node_ref::<html::Section>();
    section_ref.on_load(move |_| {
        let millis = CHART_REVEAL_DELAY.as_millis() as u32;
        gloo_timers::callback::Timeout::new(millis, move || build_charts(renderer)).forget();
    });

    let logout_ctx = ctx.clone();
    let on_logout = move |_| logout_ctx.logout();

    view! {
        <Nav />

        <section id="dashboard" class="dashboard" node_ref=section_ref>
            <header class="dash-header">
                <div>
                    <h1>"Sales Overview"</h1>
                    <p class="dash-sub">"Sales by product and outlet"</p>
                </div>
                <div class="dash-user">
                    <span id="dash-user-name" class="dash-user-name">{badge.name}</span>
                    <span id="dash-user-role" class="dash-user-role">{badge.role}</span>
                    <button id="logout-btn" type="button" class="btn btn-ghost" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>

            <div class="chart-grid">
                {standard_descriptors()
                    .iter()
                    .map(|d| view! { <ChartCard anchor=d.anchor /> })
                    .collect_view()}
            </div>

            <div class="table-card">
                <h2>"Outlet Type Summary"</h2>
                <table id=OUTLET_TABLE_ANCHOR class="data-table" />
            </div>
        </section>

        <Footer />
    }
    .into_view()
}

#[component]
fn ChartCard(anchor: &'static str) -> impl IntoView {
    let class = if is_wide(anchor) { "chart-card wide" } else { "chart-card" };
    view! {
        <div class=class>
            <h2>{chart_title(anchor)}</h2>
            <canvas id=anchor />
        </div>
    }
}

fn build_charts(renderer: StoredValue<DashboardRenderer>) {
    let Some(mut surface) = CanvasSurface::new() else {
        web_sys::console::error_1(&"Dashboard: no document to draw on".into());
        return;
    };

    let rendered = renderer
        .try_update_value(|r| r.render(&mut surface))
        .unwrap_or(Rendered::AlreadyBuilt);

    if let Rendered::Built { failed, .. } = rendered {
        if failed > 0 {
            web_sys::console::warn_1(&format!("Dashboard: {} visuals could not be drawn", failed).into());
        }
    }
}
