//! Domain services for site configurations.
//!
//! Services contain logic that operates on domain models. Everything here
//! is pure: fetching and HTTP concerns live in the api crate.

pub mod articles;
pub mod head_metadata;
pub mod merge;
pub mod routing;
pub mod sitemap;
pub mod validation;

pub use articles::{find_article, find_article_with_section};
pub use head_metadata::{HeadMetadata, HeadScript, SiteVerification};
pub use merge::deep_merge;
pub use routing::{article_path, canonical_path, classify_path, PathKind, RoutingRules};
pub use sitemap::{sitemap_index_xml, Sitemap, UrlEntry};
pub use validation::{FieldError, SchemaError};
