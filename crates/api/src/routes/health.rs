//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub default_site: DefaultSiteHealth,
    pub remote: RemoteHealth,
}

/// The local fallback config loaded at startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DefaultSiteHealth {
    pub package: String,
    pub name: String,
    pub articles: usize,
}

/// Remote config API settings. Not probed: a slow remote degrades pages to
/// the default instead of taking the service down.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteHealth {
    pub api_base_url: String,
    pub timeout_ms: u64,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Full health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let default = state.sites.default_config();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_site: DefaultSiteHealth {
            package: state.config.site.default_package.clone(),
            name: default.name.clone(),
            articles: default.article_count(),
        },
        remote: RemoteHealth {
            api_base_url: state.config.remote.api_base_url.clone(),
            timeout_ms: state.config.remote.timeout_ms,
        },
    })
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// The default config is validated before the listener binds, so a running
/// server can always render pages.
pub async fn ready() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
    })
}
