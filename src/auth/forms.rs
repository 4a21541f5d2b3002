//! Form input and client-side validation
//!
//! Validation runs before any request is made; a failing form never reaches
//! the network.

use serde::Serialize;

use super::messages;

/// Login form fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login payload after validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email is trimmed, the password is taken as typed
    pub fn validate(&self) -> Result<LoginRequest, &'static str> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(messages::LOGIN_MISSING_FIELDS);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Registration payload after validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegistrationRequest, &'static str> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();

        if full_name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.password_confirm.is_empty()
        {
            return Err(messages::REGISTER_MISSING_FIELDS);
        }
        if self.password != self.password_confirm {
            return Err(messages::PASSWORDS_DO_NOT_MATCH);
        }

        Ok(RegistrationRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        })
    }
}

/// Change-password form fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<&Self, &'static str> {
        if self.old_password.is_empty()
            || self.new_password.is_empty()
            || self.new_password_confirm.is_empty()
        {
            return Err(messages::CHANGE_PASSWORD_MISSING_FIELDS);
        }
        if self.new_password != self.new_password_confirm {
            return Err(messages::NEW_PASSWORDS_DO_NOT_MATCH);
        }
        Ok(self)
    }
}
