//! Shared utilities for the APKS Hub site server.
//!
//! This crate provides common functionality used across all other crates:
//! - Field validators (URLs, package identifiers)
//! - URL component and XML encoding

pub mod encoding;
pub mod validation;
