//! UI Components
//!
//! Pieces shared by the pages.

pub mod chart;
pub mod footer;
pub mod intro;
pub mod nav;

pub use chart::CanvasSurface;
pub use footer::Footer;
pub use intro::IntroOverlay;
pub use nav::Nav;
