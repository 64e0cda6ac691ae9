//! Sitemap generation.
//!
//! Each tenant gets a `<urlset>` with its home page and one entry per
//! article. The root sitemap is a `<sitemapindex>` pointing at the
//! per-package sitemaps.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://hub.apks.cc/PUBG%20Mobile/com.tencent.ig</loc>
//!     <lastmod>2025-01-01T00:00:00.000Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use shared::encoding::escape_xml;

use crate::models::SiteConfig;
use crate::services::routing::{article_path, canonical_path};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
}

/// A `<urlset>` document.
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Home page plus every article with a non-empty slug, in section order.
    pub fn for_site(config: &SiteConfig, package: &str, base_url: &str, now: DateTime<Utc>) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let now_iso = iso8601(now);

        let mut urls = vec![UrlEntry {
            loc: format!("{}{}", base_url, canonical_path(&config.name, package)),
            lastmod: Some(now_iso.clone()),
        }];

        for section in &config.sections {
            for item in section.items.iter().filter(|item| !item.slug.is_empty()) {
                urls.push(UrlEntry {
                    loc: format!(
                        "{}{}",
                        base_url,
                        article_path(&config.name, package, &item.slug)
                    ),
                    lastmod: Some(
                        parse_article_date(&item.date)
                            .map(iso8601)
                            .unwrap_or_else(|| now_iso.clone()),
                    ),
                });
            }
        }

        Self { urls }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Root `<sitemapindex>` listing `{base}/{pkg}/sitemap.xml` per package.
pub fn sitemap_index_xml(base_url: &str, packages: &[String]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::with_capacity(512);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<sitemapindex xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for package in packages {
        let loc = format!("{base_url}/{package}/sitemap.xml");
        xml.push_str("  <sitemap>\n    <loc>");
        xml.push_str(&escape_xml(&loc));
        xml.push_str("</loc>\n  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Article dates are either RFC 3339 timestamps or plain `YYYY-MM-DD`.
pub fn parse_article_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
