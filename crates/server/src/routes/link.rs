//! Catch-all link handler.
//!
//! `GET /<anything>` is a link to rewrite. The path is percent-decoded so
//! `/https%3A%2F%2Fyoutu.be%2F...` and `/https://youtu.be/...` normalize the
//! same way; the query string is passed through untouched.

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use axum::response::Response;
use headers::{HeaderMapExt, Host, UserAgent};
use tubelink::{RouteOutcome, RouteRequest};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::routes::{found, html};
use crate::state::ServerState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub async fn route_link(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> ServerResult<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ServerError::MethodNotAllowed(method.to_string()));
    }

    let raw = raw_link(&uri);
    let user_agent = headers
        .typed_get::<UserAgent>()
        .map(|ua| ua.as_str().to_owned())
        .unwrap_or_default();
    let origin = request_origin(&state.config, &headers);

    let outcome = state
        .router
        .route(&RouteRequest {
            raw: &raw,
            user_agent: &user_agent,
            origin: origin.as_deref(),
        })
        .await;

    Ok(match outcome {
        RouteOutcome::Redirect { location } => found(&location),
        RouteOutcome::Html {
            body,
            cache_control,
        } => {
            let cache_control = HeaderValue::from_str(&cache_control)
                .unwrap_or_else(|_| HeaderValue::from_static("no-store"));
            html(body, cache_control)
        }
    })
}

/// Decoded path plus the verbatim `?query`.
pub fn raw_link(uri: &Uri) -> String {
    let path = uri.path();
    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
    match uri.query() {
        Some(query) => format!("{decoded}?{query}"),
        None => decoded.into_owned(),
    }
}

/// `public_base_url` when configured, else `X-Forwarded-Proto` (default
/// `https`) plus `Host`. `None` without a `Host` header.
pub fn request_origin(config: &ServerConfig, headers: &HeaderMap) -> Option<String> {
    if let Some(base) = config.public_base_url.as_deref() {
        return Some(base.trim_end_matches('/').to_owned());
    }

    let host = headers.typed_get::<Host>()?;
    let proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("https");

    Some(match host.port() {
        Some(port) => format!("{proto}://{}:{port}", host.hostname()),
        None => format!("{proto}://{}", host.hostname()),
    })
}
