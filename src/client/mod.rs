//! Backend Client
//!
//! Talks JSON to the BizAnalystics REST backend.
//!
//! - [`ApiClient`]: request wrapper producing [`ApiResponse`]
//! - [`Transport`]: the I/O seam (reqwest natively, `fetch` in the browser)
//! - [`BackendError`]: decoded error bodies

mod api;
mod error;
mod transport;

#[cfg(feature = "native")]
mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{endpoints, ApiClient, ApiRequest, ApiResponse, DEFAULT_API_BASE};
pub use error::{flatten_messages, BackendError, ClientError, FieldError};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

#[cfg(feature = "native")]
pub use http::ReqwestTransport;
