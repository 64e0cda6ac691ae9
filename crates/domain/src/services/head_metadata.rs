//! Page `<head>` metadata derived from a site configuration.
//!
//! Verification codes and analytics scripts come from the structured
//! `analytics` fields. Tenants that still ship a raw `customHeadHtml` snippet
//! get it scanned linearly for `<meta name=… content=…>` pairs and
//! `<script>` tags; this is not a general HTML parse.

use std::collections::BTreeMap;

use regex::Regex;

use crate::models::{Analytics, Article, SiteConfig};

pub const GOOGLE_VERIFICATION: &str = "google-site-verification";
pub const BAIDU_VERIFICATION: &str = "baidu-site-verification";
pub const SOGOU_VERIFICATION: &str = "sogou_site_verification";
pub const QIHU_VERIFICATION: &str = "360-site-verification";

lazy_static::lazy_static! {
    static ref META_TAG: Regex = Regex::new(r"(?is)<meta\b([^>]*)>").unwrap();
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?is)<script([^>]*)>(.*?)</script>").unwrap();
    /// One `name=value` attribute, double or single quoted.
    static ref ATTR: Regex =
        Regex::new(r#"(?i)(?:^|\s)([a-z][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

/// Value of attribute `name` in a tag's attribute text, if present.
fn attr<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTR.captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
}

/// A script to inject into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadScript {
    External(String),
    Inline(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteVerification {
    pub google: Option<String>,
    pub baidu: Option<String>,
    pub sogou: Option<String>,
    pub qihu: Option<String>,
}

impl SiteVerification {
    /// `(meta name, content)` pairs for every code that is set.
    pub fn meta_tags(&self) -> Vec<(&'static str, &str)> {
        [
            (GOOGLE_VERIFICATION, &self.google),
            (BAIDU_VERIFICATION, &self.baidu),
            (SOGOU_VERIFICATION, &self.sogou),
            (QIHU_VERIFICATION, &self.qihu),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Everything the page layout renders into `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub verification: SiteVerification,
    /// Any other `<meta name>` pairs found in the custom head HTML.
    pub other: BTreeMap<String, String>,
    pub scripts: Vec<HeadScript>,
}

impl HeadMetadata {
    /// Metadata for a tenant's home page.
    pub fn from_config(config: &SiteConfig) -> Self {
        let title = format!("{} - {}", config.name, config.seo.title);
        let images: Vec<String> = config.seo.og_image.iter().cloned().collect();

        let mut metadata = Self {
            title: title.clone(),
            description: config.seo.description.clone(),
            keywords: config.seo.keywords.clone(),
            open_graph: OpenGraph {
                title: title.clone(),
                description: config.seo.description.clone(),
                images: images.clone(),
            },
            twitter: TwitterCard {
                card: "summary_large_image",
                title,
                description: config.seo.description.clone(),
                images,
            },
            verification: SiteVerification::default(),
            other: BTreeMap::new(),
            scripts: Vec::new(),
        };

        if let Some(analytics) = &config.analytics {
            metadata.apply_analytics(analytics);
        }

        metadata
    }

    /// Metadata for an article page; titles follow `"{article} - {site}"`.
    pub fn for_article(config: &SiteConfig, article: &Article) -> Self {
        let mut metadata = Self::from_config(config);
        let title = format!("{} - {}", article.title, config.name);
        let images: Vec<String> = article
            .image_url
            .clone()
            .or_else(|| config.seo.og_image.clone())
            .into_iter()
            .collect();

        metadata.title = title.clone();
        metadata.description = article.summary.clone();
        metadata.open_graph = OpenGraph {
            title: title.clone(),
            description: article.summary.clone(),
            images: images.clone(),
        };
        metadata.twitter.title = title;
        metadata.twitter.description = article.summary.clone();
        metadata.twitter.images = images;
        metadata
    }

    fn apply_analytics(&mut self, analytics: &Analytics) {
        // Scraped values first so structured fields overwrite them.
        if let Some(html) = &analytics.custom_head_html {
            self.apply_custom_head_html(html);
        }

        if let Some(v) = &analytics.verification {
            overwrite(&mut self.verification.google, &v.google);
            overwrite(&mut self.verification.baidu, &v.baidu);
            overwrite(&mut self.verification.sogou, &v.sogou);
            overwrite(&mut self.verification.qihu, &v.qihu);
        }

        if let Some(id) = analytics.baidu_analytics_id.as_deref().filter(|s| !s.is_empty()) {
            self.push_script(HeadScript::Inline(baidu_loader(id)));
        }
        if let Some(src) = &analytics.analytics_script_url {
            self.push_script(HeadScript::External(src.clone()));
        }
        if let Some(body) = analytics
            .analytics_script_inline
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            self.push_script(HeadScript::Inline(body.to_string()));
        }
    }

    fn apply_custom_head_html(&mut self, html: &str) {
        for caps in META_TAG.captures_iter(html) {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let (Some(name), Some(content)) = (attr(attrs, "name"), attr(attrs, "content")) else {
                continue;
            };
            let content = content.to_string();
            match name {
                GOOGLE_VERIFICATION => self.verification.google = Some(content),
                BAIDU_VERIFICATION => self.verification.baidu = Some(content),
                SOGOU_VERIFICATION => self.verification.sogou = Some(content),
                QIHU_VERIFICATION => self.verification.qihu = Some(content),
                _ => {
                    self.other.insert(name.to_string(), content);
                }
            }
        }

        for caps in SCRIPT_TAG.captures_iter(html) {
            if let Some(src) = attr(&caps[1], "src").filter(|s| !s.is_empty()) {
                self.push_script(HeadScript::External(src.to_string()));
            }
            let body = caps[2].trim();
            if !body.is_empty() {
                self.push_script(HeadScript::Inline(body.to_string()));
            }
        }
    }

    fn push_script(&mut self, script: HeadScript) {
        if !self.scripts.contains(&script) {
            self.scripts.push(script);
        }
    }
}

fn overwrite(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
        *target = Some(v.to_string());
    }
}

/// Standard Baidu Tongji async loader.
fn baidu_loader(site_id: &str) -> String {
    let site_id: String = site_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!(
        "var _hmt = _hmt || [];\n(function() {{\n  var hm = document.createElement(\"script\");\n  hm.src = \"https://hm.baidu.com/hm.js?{site_id}\";\n  var s = document.getElementsByTagName(\"script\")[0];\n  s.parentNode.insertBefore(hm, s);\n}})();"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verification;
    use crate::test_fixtures::sample_config;

    fn analytics(html: &str) -> Analytics {
        Analytics {
            custom_head_html: Some(html.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_home_titles() {
        let metadata = HeadMetadata::from_config(&sample_config());
        assert_eq!(metadata.title, "PUBG Mobile - Official Download");
        assert_eq!(metadata.open_graph.title, metadata.title);
        assert_eq!(metadata.twitter.card, "summary_large_image");
        assert_eq!(metadata.open_graph.images, vec!["https://cdn.apks.cc/pubg/og.png"]);
        assert_eq!(metadata.keywords, vec!["pubg", "battle royale"]);
    }

    #[test]
    fn test_structured_and_scraped_verification_combine() {
        let metadata = HeadMetadata::from_config(&sample_config());
        assert_eq!(metadata.verification.google.as_deref(), Some("g-structured"));
        assert_eq!(metadata.verification.baidu.as_deref(), Some("codeva-abc"));
    }

    #[test]
    fn test_structured_verification_wins() {
        let mut config = sample_config();
        config.analytics = Some(Analytics {
            verification: Some(Verification {
                google: Some("structured".to_string()),
                ..Default::default()
            }),
            custom_head_html: Some(
                r#"<meta name="google-site-verification" content="scraped" />"#.to_string(),
            ),
            ..Default::default()
        });

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.verification.google.as_deref(), Some("structured"));
    }

    #[test]
    fn test_unknown_meta_goes_to_other() {
        let mut config = sample_config();
        config.analytics = Some(analytics(
            r#"<meta name="msvalidate.01" content="bing-code"><meta name="yandex-verification" content="y1"/>"#,
        ));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.other.get("msvalidate.01").unwrap(), "bing-code");
        assert_eq!(metadata.other.get("yandex-verification").unwrap(), "y1");
        assert!(metadata.verification.google.is_none());
    }

    #[test]
    fn test_meta_attribute_order_does_not_matter() {
        let mut config = sample_config();
        config.analytics = Some(analytics(
            r#"<meta content="g-reversed" name="google-site-verification">"#,
        ));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.verification.google.as_deref(), Some("g-reversed"));
    }

    #[test]
    fn test_meta_single_quotes() {
        let mut config = sample_config();
        config.analytics = Some(analytics(
            "<meta name='baidu-site-verification' content='codeva-single'>",
        ));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.verification.baidu.as_deref(), Some("codeva-single"));
    }

    #[test]
    fn test_meta_empty_content() {
        let mut config = sample_config();
        config.analytics = Some(analytics(r#"<meta name="x-empty" content="">"#));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.other.get("x-empty").map(String::as_str), Some(""));
    }

    #[test]
    fn test_meta_with_leading_attribute() {
        let mut config = sample_config();
        config.analytics = Some(analytics(
            r#"<META data-source="cms" name="360-site-verification" content="qihu-1" />"#,
        ));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.verification.qihu.as_deref(), Some("qihu-1"));
        assert!(!metadata.other.contains_key("data-source"));
    }

    #[test]
    fn test_meta_without_content_is_skipped() {
        let mut config = sample_config();
        config.analytics = Some(analytics(r#"<meta charset="utf-8"><meta name="robots">"#));

        let metadata = HeadMetadata::from_config(&config);
        assert!(metadata.other.is_empty());
    }

    #[test]
    fn test_script_tags_are_extracted() {
        let mut config = sample_config();
        config.analytics = Some(analytics(
            r#"<script async src="https://hm.baidu.com/hm.js?abc"></script>
               <script>
                 window.dataLayer = window.dataLayer || [];
               </script>"#,
        ));

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(
            metadata.scripts,
            vec![
                HeadScript::External("https://hm.baidu.com/hm.js?abc".to_string()),
                HeadScript::Inline("window.dataLayer = window.dataLayer || [];".to_string()),
            ]
        );
    }

    #[test]
    fn test_structured_scripts() {
        let mut config = sample_config();
        config.analytics = Some(Analytics {
            analytics_script_url: Some("https://stats.example.com/s.js".to_string()),
            analytics_script_inline: Some("  track();  ".to_string()),
            baidu_analytics_id: Some("abc123".to_string()),
            ..Default::default()
        });

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.scripts.len(), 3);
        assert!(matches!(&metadata.scripts[0], HeadScript::Inline(s) if s.contains("hm.js?abc123")));
        assert_eq!(
            metadata.scripts[1],
            HeadScript::External("https://stats.example.com/s.js".to_string())
        );
        assert_eq!(metadata.scripts[2], HeadScript::Inline("track();".to_string()));
    }

    #[test]
    fn test_duplicate_scripts_are_dropped() {
        let mut config = sample_config();
        config.analytics = Some(Analytics {
            analytics_script_url: Some("https://stats.example.com/s.js".to_string()),
            custom_head_html: Some(
                r#"<script src="https://stats.example.com/s.js"></script>"#.to_string(),
            ),
            ..Default::default()
        });

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.scripts.len(), 1);
    }

    #[test]
    fn test_no_analytics() {
        let mut config = sample_config();
        config.analytics = None;

        let metadata = HeadMetadata::from_config(&config);
        assert_eq!(metadata.verification, SiteVerification::default());
        assert!(metadata.other.is_empty());
        assert!(metadata.scripts.is_empty());
    }

    #[test]
    fn test_meta_tags_order() {
        let verification = SiteVerification {
            google: Some("g".to_string()),
            qihu: Some("q".to_string()),
            ..Default::default()
        };
        assert_eq!(
            verification.meta_tags(),
            vec![(GOOGLE_VERIFICATION, "g"), (QIHU_VERIFICATION, "q")]
        );
    }

    #[test]
    fn test_article_metadata() {
        let config = sample_config();
        let article = &config.sections[1].items[1];

        let metadata = HeadMetadata::for_article(&config, article);
        assert_eq!(metadata.title, "Version 3.6 - PUBG Mobile");
        assert_eq!(metadata.description, "New weapons.");
        // No article image: falls back to the site image.
        assert_eq!(metadata.open_graph.images, vec!["https://cdn.apks.cc/pubg/og.png"]);
    }

    #[test]
    fn test_baidu_loader_strips_unsafe_characters() {
        let script = baidu_loader("abc\";alert(1);//");
        assert!(script.contains("hm.js?abcalert1\""));
    }
}
