//! Response builder module
//!
//! Builds the fixed response shapes the service produces. The two failure
//! shapes deliberately carry no headers; downstream callers match on the
//! exact body text.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::logger;

/// Body text for requests rejected by the size gate
pub const BODY_TOO_LARGE: &str = "Body too large";
/// Body text for malformed or invalid credential bodies
pub const BODY_INVALID: &str = "Something wrong with the provided body";

/// Fallback used only when the response builder itself fails
fn fallback(body: &'static str) -> Response<Full<Bytes>> {
    Response::new(Full::new(Bytes::from(body)))
}

/// 200 response carrying the derived credential key as JSON
pub fn build_key_response(key: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "key": key });
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build key response: {e}"));
            fallback("Error")
        })
}

/// 500 rejection response (no headers by contract)
pub fn build_rejection_response(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|_| fallback(message))
}

/// 200 health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(status)))
        .unwrap_or_else(|_| fallback(status))
}

/// 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap_or_else(|_| fallback("Not Found"))
}
