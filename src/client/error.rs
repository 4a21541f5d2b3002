//! Client error types
//!
//! [`ClientError`] covers requests that never got a response. [`BackendError`]
//! is the backend's own complaint, decoded from a non-2xx body into one of the
//! shapes it is known to send.

use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

/// A request that could not be completed
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend could not be reached
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Messages attached to one request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub messages: Vec<String>,
}

/// Error body shapes the backend produces
///
/// Resolution order: a string `detail`, then `non_field_errors`, then any other
/// non-empty object as per-field errors. Anything else, including a missing or
/// unparseable body, is [`BackendError::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// `{"detail": "..."}`
    Detail(String),
    /// `{"non_field_errors": ["..."]}`
    NonFieldErrors(Vec<String>),
    /// `{"email": ["..."], "password": ["..."]}`, in backend order
    FieldErrors(Vec<FieldError>),
    /// No usable body
    Unrecognized,
}

impl BackendError {
    /// Decode an error body
    pub fn from_body(data: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = data else {
            return BackendError::Unrecognized;
        };

        if let Some(Value::String(detail)) = map.get("detail") {
            if !detail.is_empty() {
                return BackendError::Detail(detail.clone());
            }
        }

        if let Some(value) = map.get("non_field_errors") {
            let messages = messages_of(value);
            if !messages.is_empty() {
                return BackendError::NonFieldErrors(messages);
            }
        }

        let fields: Vec<FieldError> = map
            .iter()
            .map(|(field, value)| FieldError {
                field: field.clone(),
                messages: messages_of(value),
            })
            .filter(|f| !f.messages.is_empty())
            .collect();

        if fields.is_empty() {
            BackendError::Unrecognized
        } else {
            BackendError::FieldErrors(fields)
        }
    }

    /// The single message worth showing first, if any
    pub fn first_message(&self) -> Option<&str> {
        match self {
            BackendError::Detail(detail) => Some(detail),
            BackendError::NonFieldErrors(messages) => messages.first().map(String::as_str),
            BackendError::FieldErrors(fields) => fields
                .first()
                .and_then(|f| f.messages.first())
                .map(String::as_str),
            BackendError::Unrecognized => None,
        }
    }

    /// Every message, in order, joined by single spaces
    pub fn joined_messages(&self) -> Option<String> {
        let all: Vec<&str> = match self {
            BackendError::Detail(detail) => vec![detail.as_str()],
            BackendError::NonFieldErrors(messages) => {
                messages.iter().map(String::as_str).collect()
            }
            BackendError::FieldErrors(fields) => fields
                .iter()
                .flat_map(|f| f.messages.iter().map(String::as_str))
                .collect(),
            BackendError::Unrecognized => Vec::new(),
        };

        if all.is_empty() {
            None
        } else {
            Some(all.join(" "))
        }
    }
}

/// Every message in an error body, key by key in backend order, joined by
/// single spaces
///
/// Unlike [`BackendError::from_body`] no key takes priority: `detail` and
/// `non_field_errors` appear wherever the backend put them.
pub fn flatten_messages(data: Option<&Value>) -> Option<String> {
    let Some(Value::Object(map)) = data else {
        return None;
    };

    let all: Vec<String> = map.values().flat_map(messages_of).collect();
    if all.is_empty() {
        None
    } else {
        Some(all.join(" "))
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.joined_messages() {
            Some(messages) => f.write_str(&messages),
            None => f.write_str("unrecognized error response"),
        }
    }
}

/// Flatten one error value into display strings
fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_wins() {
        let body = json!({"detail": "No active account found", "non_field_errors": ["x"]});
        assert_eq!(
            BackendError::from_body(Some(&body)),
            BackendError::Detail("No active account found".to_string())
        );
    }

    #[test]
    fn test_non_field_errors() {
        let body = json!({"non_field_errors": ["Bad credentials", "Try again"]});
        let err = BackendError::from_body(Some(&body));
        assert_eq!(err.first_message(), Some("Bad credentials"));
        assert_eq!(err.joined_messages().as_deref(), Some("Bad credentials Try again"));
    }

    #[test]
    fn test_field_errors_keep_backend_order() {
        let body = json!({
            "password": ["This password is too short.", "This password is too common."],
            "email": ["user with this email already exists."],
            "full_name": "Required."
        });
        let err = BackendError::from_body(Some(&body));
        let BackendError::FieldErrors(fields) = &err else {
            panic!("expected field errors, got {err:?}");
        };
        assert_eq!(fields[0].field, "password");
        assert_eq!(fields[2].messages, vec!["Required.".to_string()]);
        assert_eq!(
            err.joined_messages().as_deref(),
            Some(
                "This password is too short. This password is too common. \
                 user with this email already exists. Required."
            )
        );
    }

    #[test]
    fn test_flatten_messages_keeps_every_key() {
        let body = json!({
            "non_field_errors": ["Registration is closed for this domain."],
            "email": ["user with this email already exists."],
            "detail": "Check the form."
        });
        assert_eq!(
            flatten_messages(Some(&body)).as_deref(),
            Some(
                "Registration is closed for this domain. \
                 user with this email already exists. Check the form."
            )
        );

        assert_eq!(flatten_messages(Some(&json!({}))), None);
        assert_eq!(flatten_messages(Some(&json!(["x"]))), None);
        assert_eq!(flatten_messages(None), None);
    }

    #[test]
    fn test_unrecognized_bodies() {
        assert_eq!(BackendError::from_body(None), BackendError::Unrecognized);
        assert_eq!(
            BackendError::from_body(Some(&json!("oops"))),
            BackendError::Unrecognized
        );
        assert_eq!(
            BackendError::from_body(Some(&json!({}))),
            BackendError::Unrecognized
        );
        assert_eq!(
            BackendError::from_body(Some(&json!({"detail": ""}))),
            BackendError::Unrecognized
        );
        assert_eq!(BackendError::Unrecognized.joined_messages(), None);
    }
}
