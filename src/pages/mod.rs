//! Page Controllers
//!
//! Load-time decisions for the three pages: who may see them, which nav links
//! show, what the login tabs and submit buttons look like, and the timing of
//! the landing page's intro animation. Nothing here touches a DOM; the UI
//! crate renders these values.

mod dashboard;
mod guard;
mod intro;
mod login;
mod nav;

pub use dashboard::{capitalise, UserBadge, CHART_REVEAL_DELAY};
pub use guard::{guard, Access, GuardDecision, Navigator, Page, Redirect};
pub use intro::{IntroState, IntroStep, IntroTarget, IntroTimeline};
pub use login::{AuthTab, SubmitButton, LOADING_LABEL};
pub use nav::{NavLink, NavState};

use chrono::Datelike;

/// Year shown in the page footer
pub fn footer_year() -> i32 {
    chrono::Local::now().year()
}
