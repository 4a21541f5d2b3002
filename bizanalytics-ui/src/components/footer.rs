//! Page footer

use bizanalytics::pages::footer_year;
use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <span>"© "</span>
            <span id="year">{footer_year()}</span>
            <span>" BizAnalystics. Sales insight for every outlet."</span>
        </footer>
    }
}
