//! HTTP handlers and error mapping

use crate::service::{ExtractReport, ExtractRequest, Extractor};
use crate::ExtractError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

const SERVICE_DESCRIPTION: &str =
    "Crawls websites into structured page records and probes well-known paths";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    description: &'static str,
}

/// Static service descriptor
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: SERVICE_DESCRIPTION,
    })
}

/// Runs one extraction
///
/// The body is parsed by hand so that a missing or malformed body is
/// reported with the same error shape as any other bad request.
pub async fn extract_handler(
    State(extractor): State<Extractor>,
    body: Bytes,
) -> Result<Json<ExtractReport>, ApiError> {
    let request = parse_request(&body)?;
    let report = extractor.extract(request).await?;
    Ok(Json(report))
}

fn parse_request(body: &[u8]) -> Result<ExtractRequest, ExtractError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ExtractRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ExtractError::InvalidRequest(format!("Invalid JSON body: {}", e)))
}

/// Error payload returned by the HTTP surface
#[derive(Debug)]
pub struct ApiError(ExtractError);

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            tracing::debug!("Rejected request: {}", self.0);
            let body = json!({ "error": self.0.to_string() });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        tracing::error!("Extraction failed: {}", self.0);
        let body = json!({
            "error": self.0.to_string(),
            "message": "Internal error",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
