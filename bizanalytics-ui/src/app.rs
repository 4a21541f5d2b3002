//! App Root Component
//!
//! Provides the session context and routes the three pages.

use leptos::*;
use leptos_router::*;

use crate::pages::{Dashboard, Landing, Login};
use crate::state::provide_app_context;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_context();

    view! {
        <Router>
            <Routes>
                <Route path="/" view=Landing />
                <Route path="/login" view=Login />
                <Route path="/dashboard" view=Dashboard />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <a href="/" class="btn btn-primary">"Back to BizAnalystics"</a>
        </div>
    }
}
