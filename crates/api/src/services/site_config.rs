//! Site configuration resolution.
//!
//! Every page render resolves a package to a [`SiteConfig`]: the remote
//! config API is asked first, and any failure along the way (network,
//! timeout, status, body, schema) falls back to the local default loaded at
//! startup. Remote payloads are deep-merged over the default, so a tenant
//! only needs to ship the keys it overrides on top of the required schema.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header::CACHE_CONTROL, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use domain::models::{Article, SiteConfig};
use domain::services::{deep_merge, find_article, SchemaError};
use shared::validation::validate_package_id;

use crate::config::RemoteConfig;
use crate::middleware::metrics::record_config_fetch;

/// Path of the config endpoint below `remote.api_base_url`.
pub const SITE_CONFIG_PATH: &str = "/game/site-config";

// ============================================================================
// Error Types
// ============================================================================

/// Errors from fetching a remote site configuration.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid package identifier: {0}")]
    InvalidPackage(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config API returned status {0}")]
    Status(u16),

    #[error("Config API returned an unreadable body: {0}")]
    Decode(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl FetchError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            FetchError::InvalidPackage(_) => "invalid_package",
            FetchError::Timeout(_) => "timeout",
            FetchError::Http(_) => "http_error",
            FetchError::Status(_) => "bad_status",
            FetchError::Decode(_) => "decode_error",
            FetchError::Schema(_) => "schema_error",
        }
    }
}

/// Errors loading the local default configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum DefaultSiteError {
    #[error("Failed to read default site config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Default site config {path} is invalid: {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },
}

// ============================================================================
// Fetchers
// ============================================================================

/// Source of raw, unvalidated site configuration JSON.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch_raw(&self, pkg: &str) -> Result<Value, FetchError>;
}

/// Fetches configs from the remote config API over HTTP.
pub struct HttpConfigFetcher {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl HttpConfigFetcher {
    pub fn new(config: &RemoteConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                SITE_CONFIG_PATH
            ),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch_raw(&self, pkg: &str) -> Result<Value, FetchError> {
        debug!(endpoint = %self.endpoint, pkg = pkg, "Fetching site config");

        // Always fresh: tenants expect edits to show up on the next request.
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("pkg", pkg)])
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout_ms)
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_ms)
            } else {
                FetchError::Http(e)
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Canned response for [`StaticConfigFetcher`].
#[derive(Debug, Clone)]
pub enum StaticResponse {
    Json(Value),
    Status(u16),
    Timeout,
}

/// In-memory fetcher with canned responses per package.
///
/// Unknown packages answer `404`. Counts every call so callers can assert
/// that no remote request was made.
#[derive(Debug, Default)]
pub struct StaticConfigFetcher {
    responses: HashMap<String, StaticResponse>,
    calls: AtomicUsize,
}

impl StaticConfigFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, pkg: &str, value: Value) -> Self {
        self.responses
            .insert(pkg.to_string(), StaticResponse::Json(value));
        self
    }

    pub fn with_status(mut self, pkg: &str, status: u16) -> Self {
        self.responses
            .insert(pkg.to_string(), StaticResponse::Status(status));
        self
    }

    pub fn with_timeout(mut self, pkg: &str) -> Self {
        self.responses.insert(pkg.to_string(), StaticResponse::Timeout);
        self
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigFetcher for StaticConfigFetcher {
    async fn fetch_raw(&self, pkg: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(pkg) {
            Some(StaticResponse::Json(value)) => Ok(value.clone()),
            Some(StaticResponse::Status(status)) => Err(FetchError::Status(*status)),
            Some(StaticResponse::Timeout) => Err(FetchError::Timeout(0)),
            None => Err(FetchError::Status(404)),
        }
    }
}

// ============================================================================
// Default Site
// ============================================================================

/// The validated local default config and the JSON it was parsed from.
///
/// The JSON value is kept as the merge base for remote payloads so keys the
/// default sets explicitly (including `null`) survive verbatim.
#[derive(Debug, Clone)]
pub struct DefaultSite {
    config: Arc<SiteConfig>,
    value: Arc<Value>,
}

impl DefaultSite {
    /// Read and validate the default config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefaultSiteError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| DefaultSiteError::Io {
            path: shown.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|e| DefaultSiteError::Schema {
            path: shown.clone(),
            source: SchemaError::Malformed(e.to_string()),
        })?;

        let site = Self::from_value(value).map_err(|source| DefaultSiteError::Schema {
            path: shown.clone(),
            source,
        })?;

        info!(
            path = %shown,
            name = %site.config.name,
            articles = site.config.article_count(),
            "Loaded default site config"
        );
        Ok(site)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let config = SiteConfig::from_value(value.clone())?;
        Ok(Self {
            config: Arc::new(config),
            value: Arc::new(value),
        })
    }

    pub fn config(&self) -> Arc<SiteConfig> {
        Arc::clone(&self.config)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Where a resolved config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Remote,
    Fallback,
}

/// A config that is always safe to render.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Arc<SiteConfig>,
    pub source: ConfigSource,
}

impl ResolvedConfig {
    pub fn is_remote(&self) -> bool {
        self.source == ConfigSource::Remote
    }
}

/// Resolves packages to site configurations.
pub struct SiteConfigService {
    fetcher: Arc<dyn ConfigFetcher>,
    default: DefaultSite,
}

impl SiteConfigService {
    pub fn new(fetcher: Arc<dyn ConfigFetcher>, default: DefaultSite) -> Self {
        Self { fetcher, default }
    }

    pub fn default_config(&self) -> Arc<SiteConfig> {
        self.default.config()
    }

    /// Fetch one package's config from the remote, without fallback.
    ///
    /// The payload must validate on its own before it is merged over the
    /// default; the merged result is validated again.
    pub async fn fetch(&self, pkg: &str) -> Result<SiteConfig, FetchError> {
        let start = Instant::now();
        let result = self.fetch_and_merge(pkg).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(config) => {
                record_config_fetch("success");
                debug!(
                    pkg = pkg,
                    name = %config.name,
                    duration_ms = duration_ms,
                    "Site config fetched"
                );
            }
            Err(e) => {
                record_config_fetch(e.outcome());
                debug!(pkg = pkg, error = %e, duration_ms = duration_ms, "Site config fetch failed");
            }
        }

        result
    }

    async fn fetch_and_merge(&self, pkg: &str) -> Result<SiteConfig, FetchError> {
        validate_package_id(pkg).map_err(|_| FetchError::InvalidPackage(pkg.to_string()))?;

        let raw = self.fetcher.fetch_raw(pkg).await?;
        SiteConfig::from_value(raw.clone())?;

        let merged = deep_merge(self.default.value(), &raw);
        Ok(SiteConfig::from_value(merged)?)
    }

    /// Resolve a package, falling back to the default on any failure.
    ///
    /// `None` returns the default without touching the network.
    pub async fn resolve(&self, pkg: Option<&str>) -> ResolvedConfig {
        let Some(pkg) = pkg else {
            return self.fallback();
        };

        match self.fetch(pkg).await {
            Ok(config) => ResolvedConfig {
                config: Arc::new(config),
                source: ConfigSource::Remote,
            },
            Err(e) => {
                warn!(pkg = pkg, error = %e, "Falling back to default site config");
                self.fallback()
            }
        }
    }

    /// Resolve a package and look up one of its articles by slug.
    pub async fn find_article(&self, pkg: Option<&str>, slug: &str) -> Option<Article> {
        let resolved = self.resolve(pkg).await;
        find_article(&resolved.config, slug).cloned()
    }

    fn fallback(&self) -> ResolvedConfig {
        ResolvedConfig {
            config: self.default.config(),
            source: ConfigSource::Fallback,
        }
    }
}
