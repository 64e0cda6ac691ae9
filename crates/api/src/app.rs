use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use domain::services::RoutingRules;

use crate::config::Config;
use crate::middleware::{
    canonical_redirect, metrics_handler, metrics_middleware, security_headers_middleware,
    trace_id,
};
use crate::routes::{health, pages, sitemap};
use crate::services::SiteConfigService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sites: Arc<SiteConfigService>,
    pub routing: Arc<RoutingRules>,
}

pub fn create_app(config: Config, sites: SiteConfigService) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        routing: Arc::new(config.routing.rules()),
        sites: Arc::new(sites),
        config: config.clone(),
    };

    // Operational and crawler routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/robots.txt", get(sitemap::robots_txt))
        .route("/sitemap.xml", get(sitemap::sitemap_index));

    // Tenant pages. The first segment is a package in `/:segment` and a site
    // name below it; the router needs a single parameter name per position.
    let page_routes = Router::new()
        .route("/:segment", get(pages::package_page))
        .route("/:segment/sitemap.xml", get(sitemap::package_sitemap))
        .route("/:segment/:pkg", get(pages::home_page))
        .route("/:segment/:pkg/articles/:slug", get(pages::article_page));

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .fallback(pages::not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            canonical_redirect,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .with_state(state)
}
