use thiserror::Error;

/// Failures inside the routing pipeline.
///
/// Never returned to callers of [`LinkRouter::route`](crate::LinkRouter::route),
/// which logs them and redirects to the platform home page instead.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("request origin {origin:?} is not a usable base URL: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    #[error("interstitial path {path:?} cannot be joined to {origin:?}: {source}")]
    InterstitialPath {
        origin: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
}
