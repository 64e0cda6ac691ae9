//! Domain layer for the APKS Hub site server.
//!
//! This crate contains:
//! - The site configuration model (`SiteConfig` and its parts)
//! - Schema validation, deep merge and article lookup
//! - Head metadata extraction, sitemap generation and path classification

pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_fixtures;
