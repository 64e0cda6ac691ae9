//! Fixtures for unit tests.

use std::path::{Path, PathBuf};

use domain::models::SiteConfig;

use crate::services::site_config::DefaultSite;

pub fn default_site_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default-site.json")
}

pub fn default_site() -> DefaultSite {
    DefaultSite::load(default_site_path()).expect("default site config loads")
}

pub fn sample_config() -> SiteConfig {
    (*default_site().config()).clone()
}
