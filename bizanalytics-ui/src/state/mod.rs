//! State Management
//!
//! Session storage over `localStorage` and the context shared by the pages.

pub mod session;

pub use session::{provide_app_context, AppContext, BrowserNavigator, LocalStore};
