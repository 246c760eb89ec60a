//! HTTP handlers
//!
//! - `health`: liveness and readiness
//! - `link`: every path not claimed below, answered by the link router
//! - `redirect`: the mobile interstitial page

pub mod health;
pub mod link;
pub mod redirect;

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub(crate) const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// 302 to `location`. Anything outside printable ASCII is percent-encoded;
/// `HeaderValue` would otherwise pass raw UTF-8 through as obs-text.
pub(crate) fn found(location: &str) -> Response {
    let value = if location.bytes().all(|byte| byte.is_ascii_graphic()) {
        HeaderValue::from_str(location)
    } else {
        HeaderValue::from_str(&header_safe(location))
    }
    .unwrap_or_else(|_| HeaderValue::from_static("/"));
    (StatusCode::FOUND, [(LOCATION, value)]).into_response()
}

/// 200 HTML document.
pub(crate) fn html(body: String, cache_control: HeaderValue) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE)),
            (axum::http::header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response()
}

/// Percent-encode control bytes, spaces, and everything outside ASCII.
fn header_safe(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_graphic() {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
