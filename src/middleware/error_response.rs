//! Error response normalization middleware
//!
//! Rejections produced by axum before a handler runs (body or query decoding,
//! unknown routes, wrong methods, timeouts) come back as text/plain. This
//! rewrites every non-JSON error into the standard failure envelope.

use crate::api::ApiResponse;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Rewrite non-JSON 4xx/5xx responses into `ApiResponse::fail`.
///
/// A plain 400 only comes from a failed extractor, so it is reported as a
/// validation failure like any other malformed input.
pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();

    // Probes and the Prometheus exporter keep their own plain-text bodies
    if path == "/health" || path == "/ready" || path == "/metrics" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        return response;
    }

    envelope_for(status)
}

fn envelope_for(status: StatusCode) -> Response {
    let (status, message) = match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Malformed request")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => (status, "Unsupported content type"),
        StatusCode::PAYLOAD_TOO_LARGE => (status, "Request body too large"),
        StatusCode::NOT_FOUND => (status, "Not found"),
        StatusCode::METHOD_NOT_ALLOWED => (status, "Method not allowed"),
        StatusCode::REQUEST_TIMEOUT => (status, "Request timed out"),
        _ if status.is_client_error() => (status, "Client error"),
        _ => (status, "An internal error occurred"),
    };

    (status, Json(ApiResponse::<()>::fail(message))).into_response()
}
