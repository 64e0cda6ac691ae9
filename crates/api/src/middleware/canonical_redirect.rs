//! Canonical URL redirects.
//!
//! Runs before the page handlers:
//! - `/` → `301 /{siteName}/{defaultPkg}`, or `307 /{defaultPkg}` when the
//!   default package's remote config is unavailable.
//! - `/{pkg}` → `301 /{siteName}/{pkg}` when the remote config resolves;
//!   otherwise the request continues to the page handler marked with
//!   [`RemoteUnavailable`], so the remote is not asked twice.
//! - Everything else passes through untouched.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use domain::services::{canonical_path, classify_path, PathKind};

use crate::app::AppState;
use crate::middleware::metrics::record_redirect;

/// Request extension: this request's remote config fetch already failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteUnavailable;

pub async fn canonical_redirect(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match classify_path(req.uri().path(), &state.routing) {
        PathKind::Root => redirect_root(&state, req.uri()).await,
        PathKind::BarePackage(pkg) => match state.sites.fetch(&pkg).await {
            Ok(config) if !config.name.trim().is_empty() => {
                record_redirect("package");
                redirect(
                    StatusCode::MOVED_PERMANENTLY,
                    &canonical_path(&config.name, &pkg),
                    req.uri(),
                )
            }
            result => {
                if let Err(e) = result {
                    warn!(pkg = %pkg, error = %e, "Remote site config unavailable");
                }
                req.extensions_mut().insert(RemoteUnavailable);
                next.run(req).await
            }
        },
        PathKind::Canonical | PathKind::Passthrough => next.run(req).await,
    }
}

async fn redirect_root(state: &AppState, uri: &Uri) -> Response {
    let pkg = state.config.site.default_package.as_str();

    match state.sites.fetch(pkg).await {
        Ok(config) if !config.name.trim().is_empty() => {
            record_redirect("root");
            redirect(
                StatusCode::MOVED_PERMANENTLY,
                &canonical_path(&config.name, pkg),
                uri,
            )
        }
        Ok(_) | Err(_) => {
            // Temporary: the canonical target may change once the remote recovers.
            record_redirect("root_fallback");
            debug!(pkg = pkg, "Default package unresolved, redirecting to bare path");
            redirect(StatusCode::TEMPORARY_REDIRECT, &format!("/{pkg}"), uri)
        }
    }
}

/// Redirect to `location`, carrying over the original query string.
pub fn redirect(status: StatusCode, location: &str, original: &Uri) -> Response {
    let location = match original.query() {
        Some(query) if !query.is_empty() => format!("{location}?{query}"),
        _ => location.to_string(),
    };

    (status, [(header::LOCATION, location)]).into_response()
}
