//! Fetch Transport
//!
//! Carries core API requests over the browser `fetch` API.

use async_trait::async_trait;
use bizanalytics::client::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use gloo_net::http::{Request, RequestBuilder};

pub use bizanalytics::client::DEFAULT_API_BASE;

/// localStorage key that overrides the backend base URL
pub const API_URL_KEY: &str = "biz_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten());
    resolve_api_base(stored.as_deref())
}

/// Stored override if non-blank, else the default; no trailing slash
fn resolve_api_base(stored: Option<&str>) -> String {
    stored
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// `fetch`-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for GlooTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = builder(request.method, &request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }

        let req = match request.body {
            Some(body) => req
                .body(body)
                .map_err(|e| TransportError::Request(e.to_string()))?,
            None => req
                .build()
                .map_err(|e| TransportError::Request(e.to_string()))?,
        };

        // fetch rejects only when no response arrived at all
        let response = req
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}
