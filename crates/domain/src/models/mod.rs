//! Domain models for tenant site configurations.

pub mod site_config;

pub use site_config::{
    Analytics, ApkDialog, ApkDownload, Article, Downloads, Extra, Feedback, Footer, Header, Hero,
    Logo, Section, Seo, SiteConfig, StoreButton, Verification, Video,
};
