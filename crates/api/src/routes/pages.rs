//! Tenant page handlers.
//!
//! Canonical redirects for `/` and resolvable `/{pkg}` happen in the
//! `canonical_redirect` middleware; these handlers see what is left.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension,
};

use domain::models::SiteConfig;
use domain::services::{canonical_path, classify_path, find_article, PathKind};

use crate::app::AppState;
use crate::error::PageError;
use crate::middleware::{redirect, RemoteUnavailable};
use crate::services::site_config::ResolvedConfig;
use crate::views::{self, PageContext};

/// `GET /{pkg}`, reached when the canonical redirect did not happen.
///
/// Serves the local default for the default package while the remote is
/// down, redirects if the remote has recovered since, and 404s otherwise.
/// When the redirect middleware already failed to fetch this package, the
/// remote is not asked again.
pub async fn package_page(
    State(state): State<AppState>,
    Path(pkg): Path<String>,
    unavailable: Option<Extension<RemoteUnavailable>>,
    uri: Uri,
) -> Result<Response, PageError> {
    // Files like `/favicon.ico` land here too; they are never packages.
    if !matches!(classify_path(uri.path(), &state.routing), PathKind::BarePackage(_)) {
        return Err(PageError::NotFound(uri.path().to_string()));
    }

    let resolved = match unavailable {
        Some(_) => state.sites.resolve(None).await,
        None => state.sites.resolve(Some(&pkg)).await,
    };
    let resolved = renderable(&state, &pkg, resolved)?;

    if resolved.is_remote() {
        return Ok(redirect(
            StatusCode::MOVED_PERMANENTLY,
            &canonical_path(&resolved.config.name, &pkg),
            &uri,
        ));
    }

    Ok(render_home(&resolved.config, &pkg))
}

/// `GET /{siteName}/{pkg}`
pub async fn home_page(
    State(state): State<AppState>,
    Path((site_name, pkg)): Path<(String, String)>,
) -> Result<Response, PageError> {
    let resolved = resolve_for_page(&state, &pkg).await?;

    if let Some(response) = name_mismatch(&resolved, &site_name) {
        return Ok(response);
    }

    Ok(render_home(&resolved.config, &pkg))
}

/// `GET /{siteName}/{pkg}/articles/{slug}`
pub async fn article_page(
    State(state): State<AppState>,
    Path((site_name, pkg, slug)): Path<(String, String, String)>,
) -> Result<Response, PageError> {
    let resolved = resolve_for_page(&state, &pkg).await?;

    if let Some(response) = name_mismatch(&resolved, &site_name) {
        return Ok(response);
    }

    let config = &resolved.config;
    let article = find_article(config, &slug)
        .ok_or_else(|| PageError::NotFound(format!("article '{slug}' in {pkg}")))?;

    let ctx = page_context(config, &pkg);
    Ok(Html(views::article::render(&ctx, article).into_string()).into_response())
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> PageError {
    PageError::NotFound(uri.path().to_string())
}

/// Resolve a package for rendering.
async fn resolve_for_page(state: &AppState, pkg: &str) -> Result<ResolvedConfig, PageError> {
    let resolved = state.sites.resolve(Some(pkg)).await;
    renderable(state, pkg, resolved)
}

/// A fallback config is only rendered for the default package; for any
/// other package it would show the wrong game.
fn renderable(
    state: &AppState,
    pkg: &str,
    resolved: ResolvedConfig,
) -> Result<ResolvedConfig, PageError> {
    if resolved.is_remote() || pkg == state.config.site.default_package {
        Ok(resolved)
    } else {
        Err(PageError::NotFound(format!("site config for {pkg}")))
    }
}

/// A remote config whose name differs from the URL sends the visitor home.
fn name_mismatch(resolved: &ResolvedConfig, site_name: &str) -> Option<Response> {
    if resolved.is_remote() && resolved.config.name != site_name {
        tracing::debug!(
            expected = %resolved.config.name,
            got = %site_name,
            "Site name mismatch, redirecting to root"
        );
        return Some((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response());
    }
    None
}

fn page_context<'a>(config: &'a SiteConfig, pkg: &'a str) -> PageContext<'a> {
    PageContext {
        config,
        package: pkg,
        home_href: canonical_path(&config.name, pkg),
    }
}

fn render_home(config: &SiteConfig, pkg: &str) -> Response {
    let ctx = page_context(config, pkg);
    Html(views::home::render(&ctx).into_string()).into_response()
}
