//! Sitemaps and robots.txt.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use domain::services::{sitemap_index_xml, Sitemap};

use crate::app::AppState;
use crate::error::PageError;

const XML_CONTENT_TYPE: &str = "application/xml";

/// `GET /sitemap.xml`: index of every configured package sitemap.
pub async fn sitemap_index(State(state): State<AppState>) -> Response {
    let xml = sitemap_index_xml(&state.config.site.base_url, &state.config.sitemap.packages);
    ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response()
}

/// `GET /{pkg}/sitemap.xml`: home page plus every article.
///
/// Only remote configs are listed; the local default is a stand-in and
/// must not be indexed under another package's URLs.
pub async fn package_sitemap(
    State(state): State<AppState>,
    Path(pkg): Path<String>,
) -> Result<Response, PageError> {
    let config = state.sites.fetch(&pkg).await.map_err(|e| {
        tracing::warn!(pkg = %pkg, error = %e, "Sitemap requested for unavailable site config");
        PageError::NotFound(format!("sitemap for {pkg}"))
    })?;

    let xml = Sitemap::for_site(&config, &pkg, &state.config.site.base_url, Utc::now()).into_xml();
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}

/// `GET /robots.txt`
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let body = robots_body(&state.config.site.base_url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

fn robots_body(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}
