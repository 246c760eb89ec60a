//! Built-in sources against a local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use canonical::{ContentKind, PlatformConfig};
use metadata::{
    fallback, http_client, MetadataConfig, MetadataError, MetadataSource, OEmbedSource, Resolver,
    ScrapeSource,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn client() -> reqwest::Client {
    http_client(&MetadataConfig::default()).expect("client builds")
}

fn oembed_source(server: &MockServer) -> OEmbedSource {
    OEmbedSource::new(
        client(),
        &format!("{}/oembed", server.uri()),
        PlatformConfig::default(),
    )
    .expect("endpoint parses")
}

#[tokio::test]
async fn oembed_maps_response_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", WATCH_URL))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Rick Astley - Never Gonna Give You Up",
            "author_name": "Rick Astley",
            "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            "provider_name": "YouTube",
            "type": "video"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let meta = oembed_source(&server)
        .fetch(WATCH_URL)
        .await
        .expect("lookup succeeds");

    assert_eq!(meta.title, "Rick Astley - Never Gonna Give You Up");
    assert_eq!(meta.description, "Video by Rick Astley");
    assert_eq!(
        meta.thumbnail_url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
    assert_eq!(meta.canonical_url, WATCH_URL);
    assert_eq!(meta.kind, ContentKind::Video);
    assert_eq!(
        meta.embed_video_url.as_deref(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
    );
}

#[tokio::test]
async fn oembed_skips_network_for_playlists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let meta = oembed_source(&server)
        .fetch("https://www.youtube.com/playlist?list=PL1")
        .await
        .expect("placeholder");

    assert_eq!(meta.kind, ContentKind::Playlist);
    assert_eq!(meta.title, "YouTube playlist");
}

#[tokio::test]
async fn oembed_non_success_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = oembed_source(&server)
        .fetch(WATCH_URL)
        .await
        .expect_err("404 is a failure");
    assert!(matches!(err, MetadataError::Status { status: 404, .. }));
}

#[tokio::test]
async fn resolver_falls_back_on_non_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let resolver = Resolver::new(
        Arc::new(oembed_source(&server)),
        Duration::from_secs(2),
        PlatformConfig::default(),
    );
    let meta = resolver.resolve(WATCH_URL).await;

    assert_eq!(meta, fallback(WATCH_URL, &PlatformConfig::default()));
}

#[tokio::test]
async fn resolver_falls_back_on_slow_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "title": "too late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let resolver = Resolver::new(
        Arc::new(oembed_source(&server)),
        Duration::from_millis(200),
        PlatformConfig::default(),
    );
    let meta = resolver.resolve(WATCH_URL).await;

    assert_eq!(meta.title, "YouTube video");
    assert_eq!(meta.kind, ContentKind::Video);
}

#[tokio::test]
async fn resolver_falls_back_on_unreachable_host() {
    // Port 9 (discard) on loopback is closed in test environments.
    let source = OEmbedSource::new(
        client(),
        "http://127.0.0.1:9/oembed",
        PlatformConfig::default(),
    )
    .expect("endpoint parses");
    let resolver = Resolver::new(
        Arc::new(source),
        Duration::from_secs(2),
        PlatformConfig::default(),
    );

    let meta = resolver.resolve(WATCH_URL).await;
    assert_eq!(meta, fallback(WATCH_URL, &PlatformConfig::default()));
}

#[tokio::test]
async fn scrape_reads_meta_tags() {
    let server = MockServer::start().await;
    let page = r#"<!DOCTYPE html><html><head>
        <title>Scraped - YouTube</title>
        <meta name="title" content="Scraped title">
        <meta property="og:description" content="Scraped description">
        <meta property="og:image" content="https://i.ytimg.com/vi/abc123XYZ_-/maxresdefault.jpg">
        <link rel="canonical" href="https://www.youtube.com/watch?v=abc123XYZ_-">
        <meta property="og:site_name" content="YouTube">
    </head><body></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", "abc123XYZ_-"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;

    let source = ScrapeSource::new(client(), PlatformConfig::default());
    let url = format!("{}/watch?v=abc123XYZ_-", server.uri());
    let meta = source.fetch(&url).await.expect("scrape succeeds");

    assert_eq!(meta.title, "Scraped title");
    assert_eq!(meta.description, "Scraped description");
    assert_eq!(
        meta.canonical_url,
        "https://www.youtube.com/watch?v=abc123XYZ_-"
    );
    assert_eq!(meta.kind, ContentKind::Video);
}

#[tokio::test]
async fn scrape_page_without_markers_is_a_parse_miss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let source = ScrapeSource::new(client(), PlatformConfig::default());
    let err = source
        .fetch(&format!("{}/watch?v=abc", server.uri()))
        .await
        .expect_err("no title");
    assert!(matches!(err, MetadataError::Parse(_)));
}

#[tokio::test]
async fn scrape_truncates_large_pages() {
    let server = MockServer::start().await;
    let mut page = String::from("<head><meta name=\"title\" content=\"Early title\"></head>");
    page.push_str(&"x".repeat(64 * 1024));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;

    let source = ScrapeSource::new(client(), PlatformConfig::default()).with_max_body_bytes(1024);
    let meta = source
        .fetch(&format!("{}/shorts/abc123", server.uri()))
        .await
        .expect("head fits in limit");
    assert_eq!(meta.title, "Early title");
    assert_eq!(meta.kind, ContentKind::Shorts);
}

#[tokio::test]
#[should_panic(expected = "mock metadata source panicked")]
async fn resolver_leaves_source_panics_to_the_caller() {
    let resolver = Resolver::new(
        Arc::new(metadata::mock::MockSource::panicking()),
        Duration::from_secs(1),
        PlatformConfig::default(),
    );

    resolver.resolve(WATCH_URL).await;
}
