//! Session State
//!
//! Owns the client's credentials: an access token, a refresh token and the
//! cached user profile, all kept in a [`KeyValueStore`] under fixed keys.
//!
//! One [`Session`] is created when the process (or page) starts and is handed
//! to whatever needs it. Logged-in status is nothing more than the presence of
//! an access token; expiry and signatures are the backend's business.

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::{KeyValueStore, MemoryStore};

#[cfg(feature = "native")]
pub use store::FileStore;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage key holding the access token
pub const ACCESS_KEY: &str = "biz_access";
/// Storage key holding the refresh token
pub const REFRESH_KEY: &str = "biz_refresh";
/// Storage key holding the JSON-serialized [`UserProfile`]
pub const USER_KEY: &str = "biz_user";

/// Profile returned by the backend on login, registration and profile fetch
///
/// Cached verbatim: any JSON object is accepted. Known text fields are picked
/// out only when they hold strings; everything else stays in `extra` and is
/// written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct UserProfile {
    /// Whatever the backend uses as a key: number, string, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for UserProfile {
    fn from(mut map: Map<String, Value>) -> Self {
        let id = map.remove("id");
        let full_name = take_string(&mut map, "full_name");
        let email = take_string(&mut map, "email");
        let role = take_string(&mut map, "role");
        let date_joined = take_string(&mut map, "date_joined");
        let last_login = take_string(&mut map, "last_login");

        Self {
            id,
            full_name,
            email,
            role,
            date_joined,
            last_login,
            extra: map,
        }
    }
}

/// Remove `key` only if it holds a string
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl UserProfile {
    /// Name to greet the user with: full name, falling back to email
    pub fn greeting_name(&self) -> Option<&str> {
        non_empty(self.full_name.as_deref()).or_else(|| non_empty(self.email.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Point-in-time copy of everything the session holds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

/// Token store over a persistent key-value backend
#[derive(Debug, Clone, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying storage backend
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_KEY).filter(|t| !t.is_empty())
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_KEY).filter(|t| !t.is_empty())
    }

    /// Persist a token pair. A missing refresh token removes the stored one.
    pub fn set(&self, access: &str, refresh: Option<&str>) -> StoreResult<()> {
        self.store.set(ACCESS_KEY, access)?;
        match refresh {
            Some(refresh) => self.store.set(REFRESH_KEY, refresh)?,
            None => self.store.remove(REFRESH_KEY)?,
        }
        tracing::debug!(has_refresh = refresh.is_some(), "Stored session tokens");
        Ok(())
    }

    /// Remove both tokens and the cached profile
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// failure is returned.
    pub fn clear(&self) -> StoreResult<()> {
        let results = [
            self.store.remove(ACCESS_KEY),
            self.store.remove(REFRESH_KEY),
            self.store.remove(USER_KEY),
        ];
        tracing::debug!("Cleared session");
        results.into_iter().collect::<StoreResult<Vec<()>>>()?;
        Ok(())
    }

    /// Cache the user profile
    pub fn save_user(&self, user: &UserProfile) -> StoreResult<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json)
    }

    /// Drop the cached profile
    pub fn forget_user(&self) -> StoreResult<()> {
        self.store.remove(USER_KEY)
    }

    /// Cached user profile; missing or malformed data reads as `None`
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed cached user profile");
                None
            }
        }
    }

    /// True iff an access token is present
    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            access_token: self.access_token(),
            refresh_token: self.refresh_token(),
            user: self.user(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_user() -> UserProfile {
        UserProfile {
            id: Some(serde_json::json!(7)),
            full_name: Some("Demo Analyst".to_string()),
            email: Some("demo@bizanalytics.com".to_string()),
            role: Some("analyst".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_logged_in_follows_access_token() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_logged_in());

        session.set("a", Some("r")).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.refresh_token().as_deref(), Some("r"));

        // refresh token alone does not count
        session.store().remove(ACCESS_KEY).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_empty_access_token_is_logged_out() {
        let session = Session::new(MemoryStore::new());
        session.store().set(ACCESS_KEY, "").unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_set_without_refresh_removes_old_refresh() {
        let session = Session::new(MemoryStore::new());
        session.set("a1", Some("r1")).unwrap();
        session.set("a2", None).unwrap();

        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn test_clear_removes_everything() {
        let session = Session::new(MemoryStore::new());
        session.set("a", Some("r")).unwrap();
        session.save_user(&demo_user()).unwrap();

        session.clear().unwrap();

        assert_eq!(session.snapshot(), SessionSnapshot::default());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_user_roundtrip_keeps_unknown_fields() {
        let session = Session::new(MemoryStore::new());
        let mut user = demo_user();
        user.extra
            .insert("team".to_string(), serde_json::json!("north"));

        session.save_user(&user).unwrap();
        assert_eq!(session.user(), Some(user));
    }

    #[test]
    fn test_user_with_unexpected_field_types_is_kept() {
        let raw = serde_json::json!({
            "id": "u-42",
            "full_name": "Demo",
            "role": ["analyst"],
            "last_login": null
        });
        let user: UserProfile = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(user.id, Some(serde_json::json!("u-42")));
        assert_eq!(user.greeting_name(), Some("Demo"));
        assert_eq!(user.role, None);
        assert_eq!(user.extra["role"], serde_json::json!(["analyst"]));

        let session = Session::new(MemoryStore::new());
        session.save_user(&user).unwrap();
        let stored: Value = serde_json::from_str(&session.store().get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, raw);
        assert_eq!(session.user(), Some(user));
    }

    #[test]
    fn test_malformed_user_reads_as_none() {
        let session = Session::new(MemoryStore::new());
        session.store().set(USER_KEY, "undefined").unwrap();
        assert_eq!(session.user(), None);

        session.store().set(USER_KEY, "null").unwrap();
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_greeting_name_fallbacks() {
        let mut user = demo_user();
        assert_eq!(user.greeting_name(), Some("Demo Analyst"));

        user.full_name = Some(String::new());
        assert_eq!(user.greeting_name(), Some("demo@bizanalytics.com"));

        user.email = None;
        assert_eq!(user.greeting_name(), None);
    }
}
