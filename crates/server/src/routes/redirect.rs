use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::response::Response;
use serde::Deserialize;
use tubelink::render::render_interstitial;
use tubelink::InterstitialParams;

use crate::routes::{found, html};
use crate::state::ServerState;

/// Query written by the router when it sends a phone here.
#[derive(Debug, Default, Deserialize)]
pub struct InterstitialQuery {
    pub web: Option<String>,
    pub android: Option<String>,
    pub ios: Option<String>,
    pub platform: Option<String>,
}

/// Mobile interstitial. Without a usable `web` destination, or with a native
/// URL outside the platform's schemes, the caller is sent to `/`.
pub async fn interstitial(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<InterstitialQuery>,
) -> Response {
    let Some(params) = InterstitialParams::from_query(
        query.web,
        query.android,
        query.ios,
        query.platform.as_deref(),
        &state.router.platform().app_scheme,
    ) else {
        tracing::debug!("interstitial_rejected");
        return found("/");
    };

    let body = render_interstitial(
        &params,
        &state.config.interstitial,
        state.router.platform(),
    );
    html(body, HeaderValue::from_static("no-store"))
}
