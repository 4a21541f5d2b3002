//! Pages
//!
//! One component per route. Each runs the page guard before rendering.

pub mod dashboard;
pub mod landing;
pub mod login;

pub use dashboard::Dashboard;
pub use landing::Landing;
pub use login::Login;
