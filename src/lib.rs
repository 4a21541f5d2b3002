//! # BizAnalystics
//!
//! Client core for the BizAnalystics sales dashboard: session handling, the
//! backend auth client, page access rules and the dashboard charts.
//!
//! ## Modules
//!
//! - [`session`]: token store over a pluggable key-value backend
//! - [`client`]: JSON client for the users API
//! - [`auth`]: login, registration, logout, refresh and profile flows
//! - [`pages`]: page guard, navigation state and login page controls
//! - [`dashboard`]: chart and table construction from the sales dataset
//!
//! With the default `native` feature the crate also provides [`config`],
//! [`logging`], the [`server`] page host and the reqwest transport. The
//! browser UI builds the core without it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bizanalytics::auth::{AuthFlows, LoginForm};
//! use bizanalytics::client::{ApiClient, ReqwestTransport, DEFAULT_API_BASE};
//! use bizanalytics::session::{MemoryStore, Session};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = Session::new(MemoryStore::new());
//!     let client = ApiClient::new(DEFAULT_API_BASE, ReqwestTransport::new());
//!
//!     let outcome = AuthFlows::new(&session, &client)
//!         .login(&LoginForm::new("demo@bizanalytics.com", "Biz@123"))
//!         .await;
//!
//!     println!("{}", outcome.message());
//!     println!("Signed in: {}", session.is_logged_in());
//! }
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod pages;
pub mod session;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use session::{KeyValueStore, MemoryStore, Session, SessionSnapshot, StoreError, UserProfile};

pub use client::{ApiClient, ApiRequest, ApiResponse, BackendError, ClientError, Transport};

pub use auth::{AuthFlows, FormOutcome, ProfileError};

pub use pages::{guard, GuardDecision, Navigator, Page, Redirect};

pub use dashboard::{ChartSpec, ChartSurface, DashboardRenderer, Rendered};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use server::{build_router, serve, ServerError, ServerState};
