use serde::Deserialize;
use std::net::SocketAddr;

use domain::services::RoutingRules;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Remote site-config API
    pub remote: RemoteConfig,
    /// Public site settings and the local default tenant
    pub site: SiteSettings,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// json, pretty or compact
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the config API; `/game/site-config?pkg=` is appended.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound for one config fetch in milliseconds
    #[serde(default = "default_remote_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Absolute base URL used in sitemap links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Package served at `/`
    #[serde(default = "default_package")]
    pub default_package: String,

    /// JSON file holding the fallback site configuration
    #[serde(default = "default_config_path")]
    pub default_config_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Prefixes never canonicalized (API, framework assets)
    #[serde(default = "default_passthrough_prefixes")]
    pub passthrough_prefixes: Vec<String>,

    /// File extensions treated as static assets
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            passthrough_prefixes: default_passthrough_prefixes(),
            asset_extensions: default_asset_extensions(),
        }
    }
}

impl RoutingConfig {
    pub fn rules(&self) -> RoutingRules {
        RoutingRules {
            passthrough_prefixes: self.passthrough_prefixes.clone(),
            asset_extensions: self
                .asset_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    /// Packages listed in the root sitemap index
    #[serde(default = "default_sitemap_packages")]
    pub packages: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            packages: default_sitemap_packages(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Send Strict-Transport-Security; enable only behind TLS termination
    #[serde(default)]
    pub hsts_enabled: bool,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_api_base_url() -> String {
    "https://api.us.apks.cc".to_string()
}
fn default_remote_timeout_ms() -> u64 {
    5000
}
fn default_base_url() -> String {
    "https://hub.apks.cc".to_string()
}
fn default_package() -> String {
    "com.tencent.ig".to_string()
}
fn default_config_path() -> String {
    "config/default-site.json".to_string()
}
fn default_passthrough_prefixes() -> Vec<String> {
    RoutingRules::default().passthrough_prefixes
}
fn default_asset_extensions() -> Vec<String> {
    RoutingRules::default().asset_extensions
}
fn default_sitemap_packages() -> Vec<String> {
    vec![default_package()]
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with HUB prefix, e.g. `HUB__SITE__BASE_URL`
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("HUB")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("sitemap.packages")
                    .with_list_parse_key("routing.passthrough_prefixes")
                    .with_list_parse_key("routing.asset_extensions")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults so tests never touch config files.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30

            [logging]
            level = "debug"
            format = "pretty"

            [remote]
            api_base_url = "http://127.0.0.1:9"
            timeout_ms = 500

            [site]
            base_url = "https://hub.apks.cc"
            default_package = "com.tencent.ig"
            default_config_path = "config/default-site.json"

            [sitemap]
            packages = ["com.tencent.ig"]

            [security]
            hsts_enabled = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.site.default_package.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "HUB__SITE__DEFAULT_PACKAGE must be set".to_string(),
            ));
        }

        if shared::validation::validate_package_id(&self.site.default_package).is_err() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Invalid default package identifier: {}",
                self.site.default_package
            )));
        }

        for (key, url) in [
            ("site.base_url", &self.site.base_url),
            ("remote.api_base_url", &self.remote.api_base_url),
        ] {
            if shared::validation::validate_absolute_url(url).is_err() {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "{key} must be an absolute http(s) URL, got '{url}'"
                )));
            }
        }

        if self.remote.timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "remote.timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
