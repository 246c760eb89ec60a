use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use agent::Platform;
use canonical::{DestinationSet, PlatformConfig};
use futures::FutureExt;
use metadata::Resolver;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::RouteError;
use crate::render::render_preview;

/// Router knobs that are not part of the platform description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// `max-age` advertised on crawler preview pages.
    pub cache_max_age_secs: u64,
    /// Path of the mobile interstitial, relative to the request origin.
    pub interstitial_path: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cache_max_age_secs: 3_600,
            interstitial_path: "/redirect".to_owned(),
        }
    }
}

impl RouterOptions {
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }
}

/// One inbound link request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest<'a> {
    /// Decoded path (leading `/` optional) plus `?query` when present.
    pub raw: &'a str,
    pub user_agent: &'a str,
    /// `scheme://host[:port]` the client used to reach us, when known.
    pub origin: Option<&'a str>,
}

/// What to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// 200 with an HTML document.
    Html { body: String, cache_control: String },
    /// 302 to `location`.
    Redirect { location: String },
}

impl RouteOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RouteOutcome::Html { .. } => "preview",
            RouteOutcome::Redirect { .. } => "redirect",
        }
    }
}

/// Response router: classify the caller, then preview, redirect, or hand off.
#[derive(Debug, Clone)]
pub struct LinkRouter {
    platform: PlatformConfig,
    resolver: Resolver,
    options: RouterOptions,
}

impl LinkRouter {
    pub fn new(platform: PlatformConfig, resolver: Resolver, options: RouterOptions) -> Self {
        Self {
            platform,
            resolver,
            options,
        }
    }

    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Route one request. Never fails: internal errors and panics are logged
    /// and answered with a redirect to the platform home page.
    pub async fn route(&self, request: &RouteRequest<'_>) -> RouteOutcome {
        let start = Instant::now();
        let outcome = match AssertUnwindSafe(self.try_route(request))
            .catch_unwind()
            .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                warn!(raw = %request.raw, error = %err, "route_failed");
                self.home()
            }
            Err(payload) => {
                error!(
                    raw = %request.raw,
                    panic = panic_message(payload.as_ref()),
                    "route_panicked"
                );
                self.home()
            }
        };

        info!(
            decision = outcome.label(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "route_decision"
        );
        outcome
    }

    async fn try_route(&self, request: &RouteRequest<'_>) -> Result<RouteOutcome, RouteError> {
        let path = request.raw.split('?').next().unwrap_or_default();
        if path.trim().trim_start_matches('/').is_empty() {
            return Ok(self.home());
        }

        let reference = canonical::parse_with(request.raw, &self.platform);
        let destinations = DestinationSet::build(&reference, &self.platform);
        let client = agent::classify(request.user_agent);
        debug!(
            kind = %reference.kind(),
            crawler = client.is_crawler,
            platform = %client.platform,
            web = %destinations.web,
            "route_classified"
        );

        if client.is_crawler {
            let meta = self.resolver.resolve(&destinations.web).await;
            let body = render_preview(&meta, &destinations.web, &self.platform);
            return Ok(RouteOutcome::Html {
                body,
                cache_control: format!("public, max-age={}", self.options.cache_max_age_secs),
            });
        }

        let location = match client.platform {
            Platform::Desktop => destinations.web,
            platform => self.interstitial_url(&destinations, platform, request.origin)?,
        };
        Ok(RouteOutcome::Redirect { location })
    }

    /// `<origin><interstitial_path>?web=…&android=…&ios=…&platform=…`, or the
    /// path-relative form without an origin.
    fn interstitial_url(
        &self,
        destinations: &DestinationSet,
        platform: Platform,
        origin: Option<&str>,
    ) -> Result<String, RouteError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("web", &destinations.web)
            .append_pair("android", &destinations.android_intent)
            .append_pair("ios", &destinations.ios_scheme)
            .append_pair("platform", platform.as_str())
            .finish();
        let path = &self.options.interstitial_path;

        let Some(origin) = origin else {
            return Ok(format!("{path}?{query}"));
        };
        let base = Url::parse(origin).map_err(|source| RouteError::InvalidOrigin {
            origin: origin.to_owned(),
            source,
        })?;
        let mut target = base.join(path).map_err(|source| RouteError::InterstitialPath {
            origin: origin.to_owned(),
            path: path.clone(),
            source,
        })?;
        target.set_query(Some(&query));
        Ok(target.into())
    }

    fn home(&self) -> RouteOutcome {
        RouteOutcome::Redirect {
            location: self.platform.home_url(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
