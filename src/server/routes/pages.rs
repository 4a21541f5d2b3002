//! Page Routes
//!
//! `/`, `/login/` and `/dashboard/` all answer with the UI shell; the UI
//! reads the path and the session to decide what to show.

use axum::{
    extract::State,
    http::{header, Uri},
    response::{Html, IntoResponse},
};

use crate::pages::Page;
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::ServerState;

/// GET a page path
pub async fn page(State(state): State<ServerState>, uri: Uri) -> ServerResult<impl IntoResponse> {
    let page = Page::from_path(uri.path())
        .ok_or_else(|| ServerError::NotFound(uri.path().to_string()))?;

    let path = state.index_path();
    let html = match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServerError::IndexMissing(path));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(page = %page, "Serving page");

    Ok(([(header::CACHE_CONTROL, "no-cache")], Html(html)))
}
