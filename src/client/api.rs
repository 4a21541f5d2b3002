//! Backend API client
//!
//! One request wrapper for every endpoint: JSON in, `{ok, status, data}` out.
//! Unparseable bodies become `data: None`; transport failures are returned to
//! the caller untouched.

use serde_json::Value;

use super::error::ClientError;
use super::transport::{HttpRequest, Method, Transport};

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/users";

/// Backend endpoint paths, relative to the base URL
pub mod endpoints {
    pub const LOGIN: &str = "/login/";
    pub const REGISTER: &str = "/register/";
    pub const LOGOUT: &str = "/logout/";
    pub const TOKEN_REFRESH: &str = "/token/refresh/";
    pub const PROFILE: &str = "/profile/";
    pub const CHANGE_PASSWORD: &str = "/change-password/";
}

/// A request to one backend endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    /// Attach the bearer token, if one exists
    pub auth: bool,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            body: None,
            auth: false,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            body: Some(body),
            auth: false,
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: Method::Put,
            body: Some(body),
            auth: false,
        }
    }

    /// Mark the request as authenticated
    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }
}

/// Normalized backend response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// 2xx status
    pub ok: bool,
    pub status: u16,
    /// Parsed JSON body, `None` when empty or not JSON
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Look up a top-level string field of the body
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

/// Client for the BizAnalystics backend
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client; a trailing slash on `base_url` is dropped
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request
    ///
    /// The bearer header is attached only when `request.auth` is set and
    /// `access_token` is a non-empty token.
    pub async fn send(
        &self,
        request: ApiRequest,
        access_token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if request.auth {
            if let Some(token) = access_token.filter(|t| !t.is_empty()) {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        tracing::debug!(method = %request.method, url = %url, auth = request.auth, "Sending API request");

        let response = self
            .transport
            .execute(HttpRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await?;

        let data = serde_json::from_str::<Value>(&response.body).ok();

        tracing::debug!(status = response.status, has_body = data.is_some(), "API response");

        Ok(ApiResponse {
            ok: response.is_success(),
            status: response.status,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::MockTransport;
    use crate::client::transport::HttpResponse;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_only_when_auth_and_token() {
        let transport = MockTransport::new();
        transport.push_ok(json!({}));
        transport.push_ok(json!({}));
        transport.push_ok(json!({}));
        let client = ApiClient::new("http://backend/api/users/", transport);

        client
            .send(ApiRequest::get("/profile/").authenticated(), Some("tok"))
            .await
            .unwrap();
        client
            .send(ApiRequest::get("/profile/"), Some("tok"))
            .await
            .unwrap();
        client
            .send(ApiRequest::get("/profile/").authenticated(), None)
            .await
            .unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].url, "http://backend/api/users/profile/");
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok"));
        assert_eq!(sent[1].header("Authorization"), None);
        assert_eq!(sent[2].header("Authorization"), None);
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_body_is_serialized_json() {
        let transport = MockTransport::new();
        transport.push_ok(json!({"access": "a"}));
        let client = ApiClient::new(DEFAULT_API_BASE, transport);

        let response = client
            .send(
                ApiRequest::post(endpoints::LOGIN, json!({"email": "e", "password": "p"})),
                None,
            )
            .await
            .unwrap();

        assert!(response.ok);
        assert_eq!(response.str_field("access"), Some("a"));

        let sent = client.transport().requests();
        assert_eq!(sent[0].method, Method::Post);
        let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "e", "password": "p"}));
    }

    #[tokio::test]
    async fn test_unparseable_body_becomes_none() {
        let transport = MockTransport::new();
        transport.push(HttpResponse::new(204, ""));
        transport.push(HttpResponse::new(502, "<html>Bad Gateway</html>"));
        let client = ApiClient::new(DEFAULT_API_BASE, transport);

        let empty = client.send(ApiRequest::get("/x/"), None).await.unwrap();
        assert!(empty.ok);
        assert_eq!(empty.status, 204);
        assert_eq!(empty.data, None);

        let html = client.send(ApiRequest::get("/x/"), None).await.unwrap();
        assert!(!html.ok);
        assert_eq!(html.status, 502);
        assert_eq!(html.data, None);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockTransport::new();
        transport.push_unreachable();
        let client = ApiClient::new(DEFAULT_API_BASE, transport);

        let err = client.send(ApiRequest::get("/x/"), None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
