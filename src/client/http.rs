//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::Client;

use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Native transport over a shared reqwest [`Client`]
///
/// No request timeout is configured; a slow backend keeps the caller waiting.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                TransportError::Connect(e.to_string())
            } else {
                TransportError::Request(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        (StatusCode::CREATED, Json(json!({"auth": auth, "body": body})))
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route("/echo/", post(echo));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_roundtrip_against_stub() {
        let base = spawn_stub().await;
        let transport = ReqwestTransport::new();

        let response = transport
            .execute(HttpRequest {
                method: Method::Post,
                url: format!("{}/echo/", base),
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("Authorization".to_string(), "Bearer tok".to_string()),
                ],
                body: Some(r#"{"refresh":"r"}"#.to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["auth"], "Bearer tok");
        assert_eq!(body["body"]["refresh"], "r");
    }

    #[tokio::test]
    async fn test_connection_refused_is_connect_error() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ReqwestTransport::new()
            .execute(HttpRequest {
                method: Method::Get,
                url: format!("http://{}/", addr),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Connect(_)));
    }
}
