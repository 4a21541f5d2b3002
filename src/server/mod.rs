//! Page Host
//!
//! Serves the built UI, built with Axum. No backend API lives here; the UI
//! talks to the BizAnalystics backend directly.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Landing page
//! - `GET /login/` - Login and registration
//! - `GET /dashboard/` - Sales dashboard
//!
//! Any other path is looked up in the static directory.
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Full health status

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::ServerState;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: ServerState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::pages::page))
        .route("/login", get(routes::pages::page))
        .route("/login/", get(routes::pages::page))
        .route("/dashboard", get(routes::pages::page))
        .route("/dashboard/", get(routes::pages::page));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let assets = ServeDir::new(&state.config.static_dir);
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(page_routes)
        .nest("/health", health_routes)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the page host
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let addr = config.addr()?;

    if !config.static_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {:?}; build the UI before browsing",
            config.static_dir
        );
    }

    let router = build_router(ServerState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("BizAnalystics pages listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Page host shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
