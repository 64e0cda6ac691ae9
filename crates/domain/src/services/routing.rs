//! Request path classification and canonical URL construction.
//!
//! Short package URLs (`/com.tencent.ig`) are canonicalized to
//! `/{encodedSiteName}/{pkg}`. Classification is pure; resolving the site
//! name happens in the HTTP layer.

use shared::encoding::encode_uri_component;

/// How an inbound path should be treated before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKind {
    /// `/`: redirect to the default package's canonical home.
    Root,
    /// `/{pkg}`: redirect to the canonical form once the name is known.
    BarePackage(String),
    /// `/{siteName}/{pkg}/...`: already canonical, renderer re-checks the name.
    Canonical,
    /// Framework/API prefixes and file-like paths. Never resolved.
    Passthrough,
}

/// Rules deciding which paths bypass canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRules {
    /// Path prefixes served by other handlers, e.g. `/api`.
    pub passthrough_prefixes: Vec<String>,
    /// Lowercase file extensions treated as static assets, without the dot.
    pub asset_extensions: Vec<String>,
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self {
            passthrough_prefixes: ["/api", "/_next", "/static", "/assets", "/metrics"]
                .into_iter()
                .map(String::from)
                .collect(),
            asset_extensions: [
                "xml", "txt", "ico", "html", "htm", "png", "jpg", "jpeg", "gif", "svg", "webp",
                "avif", "css", "js", "json", "map", "woff", "woff2", "webmanifest",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl RoutingRules {
    fn has_passthrough_prefix(&self, path: &str) -> bool {
        self.passthrough_prefixes.iter().any(|prefix| {
            if prefix.ends_with('/') {
                path.starts_with(prefix.as_str())
            } else {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        })
    }

    fn is_asset(&self, segment: &str) -> bool {
        match segment.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_ascii_lowercase();
                self.asset_extensions.iter().any(|known| *known == ext)
            }
            _ => false,
        }
    }
}

/// Classify a request path.
///
/// Prefix and extension checks run before package detection so a request
/// for `sitemap.xml` never costs a config fetch. Package identifiers contain
/// dots themselves (`com.tencent.ig`), so only known asset extensions count
/// as files.
pub fn classify_path(path: &str, rules: &RoutingRules) -> PathKind {
    if rules.has_passthrough_prefix(path) {
        return PathKind::Passthrough;
    }

    if path == "/" {
        return PathKind::Root;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => PathKind::Root,
        [.., last] if rules.is_asset(last) => PathKind::Passthrough,
        [pkg] => PathKind::BarePackage((*pkg).to_string()),
        _ => PathKind::Canonical,
    }
}

/// `/{encodedSiteName}/{pkg}`
pub fn canonical_path(site_name: &str, package: &str) -> String {
    format!("/{}/{}", encode_uri_component(site_name), package)
}

/// `/{encodedSiteName}/{pkg}/articles/{slug}`
pub fn article_path(site_name: &str, package: &str, slug: &str) -> String {
    format!(
        "{}/articles/{}",
        canonical_path(site_name, package),
        encode_uri_component(slug)
    )
}
