//! Navigation Component
//!
//! Site header. Login and Register show for guests, Dashboard and Logout
//! for signed-in visitors.

use bizanalytics::pages::{NavLink, NavState};
use leptos::*;

use crate::state::AppContext;

/// Main navigation bar
#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let logged_in = ctx.logged_in;

    view! {
        <nav class="site-nav">
            <a href="/" class="brand">
                <span class="brand-mark">"◆"</span>
                <span class="brand-name">"BizAnalystics"</span>
            </a>

            <div class="nav-links">
                {NavLink::ALL
                    .into_iter()
                    .map(|link| view! { <NavItem link=link logged_in=logged_in /> })
                    .collect_view()}
            </div>
        </nav>
    }
}

/// One link, hidden when the session state says so
#[component]
fn NavItem(link: NavLink, logged_in: RwSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let class = move || {
        let base = if link == NavLink::Logout { "nav-link nav-logout" } else { "nav-link" };
        if NavState::for_session(logged_in.get()).is_visible(link) {
            base.to_string()
        } else {
            format!("{} hidden", base)
        }
    };

    let on_click = move |ev: ev::MouseEvent| {
        if link == NavLink::Logout {
            ev.prevent_default();
            ctx.logout();
        }
    };

    view! {
        <a id=link.element_id() href=link.href() class=class on:click=on_click>
            {link.label()}
        </a>
    }
}
