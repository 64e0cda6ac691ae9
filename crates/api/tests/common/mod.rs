//! Common test utilities for integration tests.
//!
//! The app is driven in-process with `tower::ServiceExt::oneshot`; the remote
//! config API is replaced by a `StaticConfigFetcher` with canned responses.

// Not every integration test uses every helper.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use apks_hub_api::{
    app::create_app,
    config::Config,
    services::{DefaultSite, SiteConfigService, StaticConfigFetcher},
};
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const DEFAULT_PKG: &str = "com.tencent.ig";
pub const OTHER_PKG: &str = "com.heavenburnsred";

/// Test configuration from embedded defaults.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

pub fn default_site_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default-site.json")
}

/// The repository's default site config, as shipped.
pub fn default_site() -> DefaultSite {
    DefaultSite::load(default_site_path()).expect("Failed to load default site config")
}

pub fn default_value() -> Value {
    default_site().value().clone()
}

/// A complete remote payload named `name` with two sections holding one and
/// two articles.
pub fn remote_config(name: &str) -> Value {
    let mut value = default_value();
    value["name"] = json!(name);
    value["hero"]["title"] = json!(format!("{name} remote hero"));
    value["sections"] = json!([
        {
            "id": "articles",
            "title": "Guides",
            "navLabel": "Guides",
            "items": [article("season-guide", "Season guide", "2025-05-20")]
        },
        {
            "id": "updates",
            "title": "Updates",
            "navLabel": "Updates",
            "enabled": false,
            "items": [
                article("v3-7", "Version 3.7", "2025-04-10T08:00:00Z"),
                article("v3-6", "Version 3.6", "sometime in spring")
            ]
        }
    ]);
    value
}

pub fn article(slug: &str, title: &str, date: &str) -> Value {
    json!({
        "slug": slug,
        "title": title,
        "summary": format!("{title} summary"),
        "content": format!("## {title}\n\nBody text."),
        "author": "Editor",
        "date": date,
        "imageHint": "screenshot"
    })
}

/// Build the app around `fetcher`, keeping a handle to inspect calls.
pub fn create_test_app(fetcher: StaticConfigFetcher) -> (Router, Arc<StaticConfigFetcher>) {
    create_test_app_with(test_config(), fetcher)
}

pub fn create_test_app_with(
    config: Config,
    fetcher: StaticConfigFetcher,
) -> (Router, Arc<StaticConfigFetcher>) {
    let fetcher = Arc::new(fetcher);
    let sites = SiteConfigService::new(fetcher.clone(), default_site());
    (create_app(config, sites), fetcher)
}

/// Fetcher answering the default package with a remote config named `name`.
pub fn fetcher_with_default(name: &str) -> StaticConfigFetcher {
    StaticConfigFetcher::new().with_config(DEFAULT_PKG, remote_config(name))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    app.clone().oneshot(request).await.expect("infallible router")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).expect("JSON body")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Location header")
}
