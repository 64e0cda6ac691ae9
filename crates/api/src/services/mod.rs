//! Application services.

pub mod site_config;

pub use site_config::{
    ConfigFetcher, ConfigSource, DefaultSite, DefaultSiteError, FetchError, HttpConfigFetcher,
    ResolvedConfig, SiteConfigService, StaticConfigFetcher,
};
