//! Auth Flows
//!
//! Login, registration, logout, silent refresh, plus profile fetch and
//! password change. Each flow is one request followed by a session update;
//! there is no retry. Form flows return a [`FormOutcome`] for the caller to
//! show, and a [`Redirect`](crate::pages::Redirect) to follow on success.

mod flows;
mod forms;

pub use flows::{AuthFlows, FormOutcome, ProfileError};
pub use forms::{
    ChangePasswordForm, LoginForm, LoginRequest, RegistrationForm, RegistrationRequest,
};

/// User-facing messages
pub mod messages {
    pub const LOGIN_MISSING_FIELDS: &str = "Please enter both email and password.";
    pub const LOGIN_FAILED: &str = "Incorrect email or password.";
    pub const REGISTER_MISSING_FIELDS: &str = "All fields are required.";
    pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
    pub const REGISTER_FAILED: &str = "Registration failed.";
    pub const REGISTERED: &str = "Account created! Taking you to the dashboard…";
    pub const CHANGE_PASSWORD_MISSING_FIELDS: &str = "All fields are required.";
    pub const NEW_PASSWORDS_DO_NOT_MATCH: &str = "New passwords do not match.";
    pub const PASSWORD_CHANGED: &str = "Password changed successfully.";
    pub const PASSWORD_CHANGE_FAILED: &str = "Password change failed.";
    pub const SERVER_UNREACHABLE: &str = "Cannot reach server. Is the backend running?";
    pub const SESSION_NOT_SAVED: &str = "Signed in, but the session could not be saved.";

    /// Greeting after a successful login
    pub fn welcome_back(name: &str) -> String {
        format!("Welcome back, {}! Redirecting…", name)
    }
}

/// Delay before leaving the login tab for the dashboard
pub const LOGIN_REDIRECT_MS: u64 = 600;
/// Delay before leaving the register tab for the dashboard
pub const REGISTER_REDIRECT_MS: u64 = 800;
