//! Auth flow implementations

use serde_json::{json, Value};
use thiserror::Error;

use super::forms::{ChangePasswordForm, LoginForm, RegistrationForm};
use super::{messages, LOGIN_REDIRECT_MS, REGISTER_REDIRECT_MS};
use crate::client::{
    endpoints, flatten_messages, ApiClient, ApiRequest, ApiResponse, BackendError, ClientError,
    Transport,
};
use crate::pages::{Page, Redirect};
use crate::session::{KeyValueStore, Session, StoreError, UserProfile};

/// What a form submission produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Show `message` as success, then follow `redirect` if any
    Success {
        message: String,
        redirect: Option<Redirect>,
    },
    /// Show `message` as an inline error; the form stays usable
    Failure(String),
}

impl FormOutcome {
    fn failure(message: impl Into<String>) -> Self {
        FormOutcome::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            FormOutcome::Success { message, .. } => message,
            FormOutcome::Failure(message) => message,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            FormOutcome::Success { redirect, .. } => *redirect,
            FormOutcome::Failure(_) => None,
        }
    }
}

/// Failures of the profile fetch
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Profile request rejected ({status}): {error}")]
    Rejected { status: u16, error: BackendError },

    #[error("Profile response was not a user profile: {0}")]
    Malformed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Auth flows over one session and one backend client
pub struct AuthFlows<'a, S, T> {
    session: &'a Session<S>,
    client: &'a ApiClient<T>,
}

impl<'a, S: KeyValueStore, T: Transport> AuthFlows<'a, S, T> {
    pub fn new(session: &'a Session<S>, client: &'a ApiClient<T>) -> Self {
        Self { session, client }
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let token = self.session.access_token();
        self.client.send(request, token.as_deref()).await
    }

    /// Sign in with email and password
    pub async fn login(&self, form: &LoginForm) -> FormOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(message) => return FormOutcome::failure(message),
        };

        let response = match self
            .send(ApiRequest::post(endpoints::LOGIN, json!(request)))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                return FormOutcome::failure(messages::SERVER_UNREACHABLE);
            }
        };

        let access = response.str_field("access").filter(|_| response.ok);
        let Some(access) = access else {
            tracing::info!(status = response.status, "Login rejected");
            let error = BackendError::from_body(response.data.as_ref());
            return FormOutcome::failure(login_failure_message(&error));
        };

        let user = user_field(response.data.as_ref());
        if let Err(e) = self.store_session(access, response.str_field("refresh"), user.as_ref()) {
            tracing::warn!(error = %e, "Could not persist session after login");
            return FormOutcome::failure(messages::SESSION_NOT_SAVED);
        }

        tracing::info!(email = %request.email, "Logged in");

        let name = user
            .as_ref()
            .and_then(UserProfile::greeting_name)
            .unwrap_or(request.email.as_str());

        FormOutcome::Success {
            message: messages::welcome_back(name),
            redirect: Some(Redirect::after(Page::Dashboard, LOGIN_REDIRECT_MS)),
        }
    }

    /// Create an account and sign in with the tokens it returns
    pub async fn register(&self, form: &RegistrationForm) -> FormOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(message) => return FormOutcome::failure(message),
        };

        let response = match self
            .send(ApiRequest::post(endpoints::REGISTER, json!(request)))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Registration request failed");
                return FormOutcome::failure(messages::SERVER_UNREACHABLE);
            }
        };

        if !response.ok {
            tracing::info!(status = response.status, "Registration rejected");
            return FormOutcome::failure(
                flatten_messages(response.data.as_ref())
                    .unwrap_or_else(|| messages::REGISTER_FAILED.to_string()),
            );
        }

        let tokens = response.data.as_ref().and_then(|d| d.get("tokens"));
        let access = tokens
            .and_then(|t| t.get("access"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let Some(access) = access else {
            tracing::warn!(status = response.status, "Registration response carried no tokens");
            return FormOutcome::failure(messages::REGISTER_FAILED);
        };
        let refresh = tokens
            .and_then(|t| t.get("refresh"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        let user = user_field(response.data.as_ref());
        if let Err(e) = self.store_session(access, refresh, user.as_ref()) {
            tracing::warn!(error = %e, "Could not persist session after registration");
            return FormOutcome::failure(messages::SESSION_NOT_SAVED);
        }

        tracing::info!(email = %request.email, "Registered new account");

        FormOutcome::Success {
            message: messages::REGISTERED.to_string(),
            redirect: Some(Redirect::after(Page::Dashboard, REGISTER_REDIRECT_MS)),
        }
    }

    /// Sign out
    ///
    /// The backend is told on a best-effort basis; whatever it says, the local
    /// session is cleared and the visitor is sent to the login page.
    pub async fn logout(&self) -> Redirect {
        if let Some(refresh) = self.session.refresh_token() {
            let request =
                ApiRequest::post(endpoints::LOGOUT, json!({ "refresh": refresh })).authenticated();
            match self.send(request).await {
                Ok(response) if response.ok => tracing::debug!("Backend acknowledged logout"),
                Ok(response) => {
                    tracing::warn!(status = response.status, "Backend rejected logout, ignoring")
                }
                Err(e) => tracing::warn!(error = %e, "Logout request failed, ignoring"),
            }
        }

        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear session storage");
        }

        tracing::info!("Logged out");
        Redirect::now(Page::Login)
    }

    /// Trade the refresh token for a new access token
    ///
    /// `Ok(false)` when there is no refresh token or the backend declines.
    /// Transport failures are returned as errors.
    pub async fn refresh(&self) -> Result<bool, ClientError> {
        let Some(refresh) = self.session.refresh_token() else {
            tracing::debug!("No refresh token, skipping refresh");
            return Ok(false);
        };

        let response = self
            .send(ApiRequest::post(
                endpoints::TOKEN_REFRESH,
                json!({ "refresh": refresh }),
            ))
            .await?;

        let access = response.str_field("access").filter(|_| response.ok);
        let Some(access) = access else {
            tracing::info!(status = response.status, "Token refresh declined");
            return Ok(false);
        };

        let new_refresh = response.str_field("refresh").unwrap_or(refresh.as_str());
        if let Err(e) = self.session.set(access, Some(new_refresh)) {
            tracing::warn!(error = %e, "Could not store refreshed tokens");
            return Ok(false);
        }

        tracing::info!(rotated = response.str_field("refresh").is_some(), "Access token refreshed");
        Ok(true)
    }

    /// Fetch the current user's profile and refresh the cached copy
    pub async fn profile(&self) -> Result<UserProfile, ProfileError> {
        let response = self
            .send(ApiRequest::get(endpoints::PROFILE).authenticated())
            .await?;

        if !response.ok {
            return Err(ProfileError::Rejected {
                status: response.status,
                error: BackendError::from_body(response.data.as_ref()),
            });
        }

        let data = response
            .data
            .ok_or_else(|| ProfileError::Malformed("empty body".to_string()))?;
        let user: UserProfile =
            serde_json::from_value(data).map_err(|e| ProfileError::Malformed(e.to_string()))?;

        self.session.save_user(&user)?;
        Ok(user)
    }

    /// Change the signed-in user's password
    pub async fn change_password(&self, form: &ChangePasswordForm) -> FormOutcome {
        let form = match form.validate() {
            Ok(form) => form,
            Err(message) => return FormOutcome::failure(message),
        };

        let request = ApiRequest::put(endpoints::CHANGE_PASSWORD, json!(form)).authenticated();
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Change-password request failed");
                return FormOutcome::failure(messages::SERVER_UNREACHABLE);
            }
        };

        if response.ok {
            let message = response
                .str_field("message")
                .unwrap_or(messages::PASSWORD_CHANGED)
                .to_string();
            FormOutcome::Success {
                message,
                redirect: None,
            }
        } else {
            FormOutcome::failure(
                flatten_messages(response.data.as_ref())
                    .unwrap_or_else(|| messages::PASSWORD_CHANGE_FAILED.to_string()),
            )
        }
    }

    fn store_session(
        &self,
        access: &str,
        refresh: Option<&str>,
        user: Option<&UserProfile>,
    ) -> Result<(), StoreError> {
        self.session.set(access, refresh)?;
        match user {
            Some(user) => self.session.save_user(user),
            None => self.session.forget_user(),
        }
    }
}

/// Login shows `detail`, else the first non-field error, else a fixed string
fn login_failure_message(error: &BackendError) -> String {
    match error {
        BackendError::Detail(_) | BackendError::NonFieldErrors(_) => error
            .first_message()
            .unwrap_or(messages::LOGIN_FAILED)
            .to_string(),
        BackendError::FieldErrors(_) | BackendError::Unrecognized => {
            messages::LOGIN_FAILED.to_string()
        }
    }
}

/// The `user` object of a response body, if it is a profile
fn user_field(data: Option<&Value>) -> Option<UserProfile> {
    let user = data?.get("user")?;
    serde_json::from_value(user.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::MockTransport;
    use crate::client::Method;
    use crate::session::MemoryStore;
    use std::time::Duration;

    fn setup() -> (Session<MemoryStore>, ApiClient<MockTransport>) {
        (
            Session::new(MemoryStore::new()),
            ApiClient::new("http://backend/api/users", MockTransport::new()),
        )
    }

    fn sent_body(client: &ApiClient<MockTransport>, index: usize) -> Value {
        let requests = client.transport().requests();
        serde_json::from_str(requests[index].body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_login_demo_scenario() {
        let (session, client) = setup();
        client.transport().push_ok(json!({
            "access": "a",
            "refresh": "r",
            "user": {"full_name": "Demo"}
        }));

        let flows = AuthFlows::new(&session, &client);
        let outcome = flows
            .login(&LoginForm::new("demo@bizanalytics.com", "Biz@123"))
            .await;

        assert!(outcome.is_success());
        assert!(outcome.message().contains("Demo"));
        assert_eq!(outcome.message(), "Welcome back, Demo! Redirecting…");
        assert_eq!(
            outcome.redirect(),
            Some(Redirect {
                to: Page::Dashboard,
                after: Duration::from_millis(600)
            })
        );

        assert_eq!(session.access_token().as_deref(), Some("a"));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
        assert!(session.is_logged_in());
        assert_eq!(
            session.user(),
            Some(UserProfile {
                full_name: Some("Demo".to_string()),
                ..Default::default()
            })
        );

        let request = &client.transport().requests()[0];
        assert_eq!(request.url, "http://backend/api/users/login/");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(
            sent_body(&client, 0),
            json!({"email": "demo@bizanalytics.com", "password": "Biz@123"})
        );
    }

    #[tokio::test]
    async fn test_login_keeps_user_with_string_id() {
        let (session, client) = setup();
        client.transport().push_ok(json!({
            "access": "a",
            "refresh": "r",
            "user": {"id": "u-42", "full_name": "Demo", "role": "analyst"}
        }));

        let outcome = AuthFlows::new(&session, &client)
            .login(&LoginForm::new("demo@bizanalytics.com", "Biz@123"))
            .await;

        assert_eq!(outcome.message(), "Welcome back, Demo! Redirecting…");
        let user = session.user().unwrap();
        assert_eq!(user.id, Some(json!("u-42")));
        assert_eq!(user.role.as_deref(), Some("analyst"));
    }

    #[tokio::test]
    async fn test_login_empty_fields_never_hit_network() {
        let (session, client) = setup();
        let flows = AuthFlows::new(&session, &client);

        for form in [
            LoginForm::new("", "Biz@123"),
            LoginForm::new("demo@bizanalytics.com", ""),
            LoginForm::new("  ", ""),
        ] {
            let outcome = flows.login(&form).await;
            assert_eq!(
                outcome,
                FormOutcome::Failure("Please enter both email and password.".to_string())
            );
        }

        assert_eq!(client.transport().request_count(), 0);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_greets_by_email_without_name() {
        let (session, client) = setup();
        client.transport().push_ok(json!({"access": "a", "refresh": "r"}));

        let outcome = AuthFlows::new(&session, &client)
            .login(&LoginForm::new("ops@bizanalytics.com", "pw"))
            .await;

        assert_eq!(outcome.message(), "Welcome back, ops@bizanalytics.com! Redirecting…");
        assert_eq!(session.user(), None);
    }

    #[tokio::test]
    async fn test_login_failure_messages() {
        let (session, client) = setup();
        client
            .transport()
            .push_status(401, json!({"detail": "No active account found with the given credentials"}));
        client
            .transport()
            .push_status(400, json!({"non_field_errors": ["Unable to log in."]}));
        client
            .transport()
            .push_status(400, json!({"email": ["Enter a valid email address."]}));
        client.transport().push_ok(json!({"refresh": "r"}));

        let flows = AuthFlows::new(&session, &client);
        let form = LoginForm::new("demo@bizanalytics.com", "wrong");

        assert_eq!(
            flows.login(&form).await.message(),
            "No active account found with the given credentials"
        );
        assert_eq!(flows.login(&form).await.message(), "Unable to log in.");
        assert_eq!(flows.login(&form).await.message(), "Incorrect email or password.");
        // 200 without an access token is still a failure
        assert_eq!(flows.login(&form).await.message(), "Incorrect email or password.");

        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_unreachable_backend() {
        let (session, client) = setup();
        client.transport().push_unreachable();

        let outcome = AuthFlows::new(&session, &client)
            .login(&LoginForm::new("demo@bizanalytics.com", "Biz@123"))
            .await;

        assert_eq!(
            outcome,
            FormOutcome::Failure("Cannot reach server. Is the backend running?".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_mismatch_never_hits_network() {
        let (session, client) = setup();
        let form = RegistrationForm {
            full_name: "Demo".to_string(),
            email: "demo@bizanalytics.com".to_string(),
            password: "Biz@123".to_string(),
            password_confirm: "Biz@321".to_string(),
        };

        let outcome = AuthFlows::new(&session, &client).register(&form).await;

        assert_eq!(outcome, FormOutcome::Failure("Passwords do not match.".to_string()));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_success_stores_tokens() {
        let (session, client) = setup();
        client.transport().push_status(
            201,
            json!({
                "message": "Account created successfully.",
                "user": {"id": 3, "email": "new@bizanalytics.com", "full_name": "New", "role": "viewer"},
                "tokens": {"refresh": "r2", "access": "a2"}
            }),
        );

        let form = RegistrationForm {
            full_name: " New ".to_string(),
            email: "new@bizanalytics.com".to_string(),
            password: "Biz@123".to_string(),
            password_confirm: "Biz@123".to_string(),
        };
        let outcome = AuthFlows::new(&session, &client).register(&form).await;

        assert_eq!(
            outcome,
            FormOutcome::Success {
                message: "Account created! Taking you to the dashboard…".to_string(),
                redirect: Some(Redirect::after(Page::Dashboard, 800)),
            }
        );
        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r2"));
        assert_eq!(session.user().and_then(|u| u.id), Some(json!(3)));
        assert_eq!(sent_body(&client, 0)["full_name"], "New");
    }

    #[tokio::test]
    async fn test_register_joins_field_errors() {
        let (session, client) = setup();
        client.transport().push_status(
            400,
            json!({
                "email": ["user with this email already exists."],
                "password": ["This password is too short.", "This password is too common."]
            }),
        );
        client.transport().push_status(500, json!(null));

        let form = RegistrationForm {
            full_name: "Demo".to_string(),
            email: "demo@bizanalytics.com".to_string(),
            password: "short".to_string(),
            password_confirm: "short".to_string(),
        };
        let flows = AuthFlows::new(&session, &client);

        assert_eq!(
            flows.register(&form).await.message(),
            "user with this email already exists. This password is too short. \
             This password is too common."
        );
        assert_eq!(flows.register(&form).await.message(), "Registration failed.");
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_register_keeps_non_field_and_field_errors() {
        let (session, client) = setup();
        client.transport().push_status(
            400,
            json!({
                "non_field_errors": ["Registration is closed for this domain."],
                "email": ["user with this email already exists."]
            }),
        );

        let form = RegistrationForm {
            full_name: "Demo".to_string(),
            email: "demo@bizanalytics.com".to_string(),
            password: "long enough".to_string(),
            password_confirm: "long enough".to_string(),
        };
        let outcome = AuthFlows::new(&session, &client).register(&form).await;

        assert_eq!(
            outcome.message(),
            "Registration is closed for this domain. user with this email already exists."
        );
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        for script in ["ok", "rejected", "unreachable"] {
            let (session, client) = setup();
            session.set("a", Some("r")).unwrap();
            session
                .save_user(&UserProfile {
                    full_name: Some("Demo".to_string()),
                    ..Default::default()
                })
                .unwrap();

            match script {
                "ok" => client.transport().push_ok(json!({"message": "Logged out successfully."})),
                "rejected" => client
                    .transport()
                    .push_status(400, json!({"error": "Token is blacklisted"})),
                _ => client.transport().push_unreachable(),
            }

            let redirect = AuthFlows::new(&session, &client).logout().await;

            assert_eq!(redirect, Redirect::now(Page::Login));
            assert!(!session.is_logged_in(), "still logged in after {script}");
            assert_eq!(session.user(), None);

            let request = &client.transport().requests()[0];
            assert_eq!(request.url, "http://backend/api/users/logout/");
            assert_eq!(request.header("Authorization"), Some("Bearer a"));
            assert_eq!(sent_body(&client, 0), json!({"refresh": "r"}));
        }
    }

    #[tokio::test]
    async fn test_logout_without_refresh_skips_backend() {
        let (session, client) = setup();
        session.set("a", None).unwrap();

        AuthFlows::new(&session, &client).logout().await;

        assert_eq!(client.transport().request_count(), 0);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_refresh_without_token_reports_failure() {
        let (session, client) = setup();
        let refreshed = AuthFlows::new(&session, &client).refresh().await.unwrap();
        assert!(!refreshed);
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_old_refresh_when_not_rotated() {
        let (session, client) = setup();
        session.set("old", Some("r")).unwrap();
        client.transport().push_ok(json!({"access": "new"}));

        let refreshed = AuthFlows::new(&session, &client).refresh().await.unwrap();

        assert!(refreshed);
        assert_eq!(session.access_token().as_deref(), Some("new"));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
        assert_eq!(sent_body(&client, 0), json!({"refresh": "r"}));
    }

    #[tokio::test]
    async fn test_refresh_rotation_and_decline() {
        let (session, client) = setup();
        session.set("old", Some("r1")).unwrap();
        client.transport().push_ok(json!({"access": "a2", "refresh": "r2"}));
        client
            .transport()
            .push_status(401, json!({"detail": "Token is invalid or expired"}));

        let flows = AuthFlows::new(&session, &client);
        assert!(flows.refresh().await.unwrap());
        assert_eq!(session.refresh_token().as_deref(), Some("r2"));

        assert!(!flows.refresh().await.unwrap());
        assert_eq!(session.access_token().as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn test_refresh_transport_error_propagates() {
        let (session, client) = setup();
        session.set("a", Some("r")).unwrap();
        client.transport().push_unreachable();

        let err = AuthFlows::new(&session, &client).refresh().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_profile_updates_cached_user() {
        let (session, client) = setup();
        session.set("a", Some("r")).unwrap();
        client.transport().push_ok(json!({
            "id": 1,
            "email": "demo@bizanalytics.com",
            "full_name": "Demo Analyst",
            "role": "analyst",
            "date_joined": "2025-01-01T00:00:00Z",
            "last_login": null
        }));
        client
            .transport()
            .push_status(401, json!({"detail": "Authentication credentials were not provided."}));

        let flows = AuthFlows::new(&session, &client);
        let user = flows.profile().await.unwrap();
        assert_eq!(user.role.as_deref(), Some("analyst"));
        assert_eq!(session.user(), Some(user));
        assert_eq!(
            client.transport().requests()[0].header("Authorization"),
            Some("Bearer a")
        );

        let err = flows.profile().await.unwrap_err();
        assert!(matches!(err, ProfileError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_change_password() {
        let (session, client) = setup();
        session.set("a", Some("r")).unwrap();
        client
            .transport()
            .push_ok(json!({"message": "Password changed successfully."}));
        client
            .transport()
            .push_status(400, json!({"old_password": "Incorrect current password."}));

        let form = ChangePasswordForm {
            old_password: "Biz@123".to_string(),
            new_password: "Biz@456!".to_string(),
            new_password_confirm: "Biz@456!".to_string(),
        };
        let flows = AuthFlows::new(&session, &client);

        let ok = flows.change_password(&form).await;
        assert!(ok.is_success());
        assert_eq!(ok.redirect(), None);
        assert_eq!(client.transport().requests()[0].method, Method::Put);

        let rejected = flows.change_password(&form).await;
        assert_eq!(rejected.message(), "Incorrect current password.");
    }
}
