//! Site configuration domain models.
//!
//! A `SiteConfig` holds everything needed to render one tenant's landing
//! page. Every object carries an `extra` extension bag so keys this server
//! does not know about survive a validate/serialize round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use shared::validation::{validate_absolute_url, validate_not_blank};

/// Unknown keys preserved verbatim.
pub type Extra = Map<String, Value>;

/// Root configuration for one package (tenant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name, used in canonical URLs and page titles.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(nested)]
    pub seo: Seo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub analytics: Option<Analytics>,
    #[validate(nested)]
    pub header: Header,
    #[validate(nested)]
    pub hero: Hero,
    #[validate(nested)]
    pub downloads: Downloads,
    #[validate(nested)]
    pub video: Video,
    #[validate(nested)]
    pub footer: Footer,
    #[validate(nested)]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub og_image: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Analytics and search-engine verification settings.
///
/// The structured fields are authoritative. `custom_head_html` is an opaque
/// snippet kept for tenants that still ship raw `<meta>`/`<script>` markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub analytics_script_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_script_inline: Option<String>,
    /// Baidu Tongji site id; renders the standard `hm.js` loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baidu_analytics_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_head_html: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Search-engine site verification codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baidu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sogou: Option<String>,
    /// 360 Search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qihu: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[validate(nested)]
    pub logo: Logo,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub url: Option<String>,
    pub alt: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub background_image: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Download channels. `None` (JSON `null` or absent) disables a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Downloads {
    #[serde(default)]
    #[validate(nested)]
    pub google_play: Option<StoreButton>,
    #[serde(default)]
    #[validate(nested)]
    pub app_store: Option<StoreButton>,
    #[serde(default)]
    #[validate(nested)]
    pub apk: Option<ApkDownload>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Downloads {
    /// Whether at least one channel is enabled.
    pub fn any_enabled(&self) -> bool {
        self.google_play.is_some() || self.app_store.is_some() || self.apk.is_some()
    }
}

/// An app-store badge (Google Play or App Store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub background_image: Option<String>,
    /// Screen-reader label.
    pub sr_text: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApkDownload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub background_image: Option<String>,
    pub line1: String,
    pub line2: String,
    #[validate(nested)]
    pub dialog: ApkDialog,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Dialog listing external APK download links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApkDialog {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub pan_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub official_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// DOM anchor of the video section.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub url: Option<String>,
    pub player_title: String,
    pub nav_label: String,
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub description: String,
    pub copyright: String,
    #[validate(nested)]
    pub feedback: Feedback,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub button_text: String,
    pub dialog_title: String,
    pub dialog_description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A group of articles shown as one page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// DOM anchor and nav-scroll target.
    pub id: String,
    pub title: String,
    pub nav_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[validate(nested)]
    pub items: Vec<Article>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Section {
    /// Sections are shown unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[validate(custom(function = "validate_not_blank"))]
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Markdown body.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_absolute_url"))]
    pub image_url: Option<String>,
    pub image_hint: String,
    /// Game version for update notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SiteConfig {
    /// Sections visible on the home page, in declaration order.
    pub fn enabled_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_enabled())
    }

    /// Total number of articles across all sections.
    pub fn article_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
