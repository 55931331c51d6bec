//! HTTP surface
//!
//! - `POST /extract` runs one extraction and returns its report as JSON
//! - `GET /health` returns a static service descriptor

mod routes;

pub use routes::{extract_handler, health_handler, ApiError, HealthResponse};

use crate::service::Extractor;
use crate::ExtractError;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn router(extractor: Extractor) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(extractor)
}

/// Serves the router on `listener` until `shutdown` resolves
///
/// In-flight requests are allowed to finish once shutdown begins.
pub async fn serve<F>(
    listener: TcpListener,
    extractor: Extractor,
    shutdown: F,
) -> Result<(), ExtractError>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(extractor))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
