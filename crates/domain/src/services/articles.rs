//! Article lookup within one resolved site configuration.

use crate::models::{Article, Section, SiteConfig};

/// Find the first article whose slug matches exactly.
///
/// Sections are scanned in declaration order, then their items in
/// declaration order. Matching is case-sensitive. Disabled sections are
/// still searched: hiding a section from the home page does not unpublish
/// its articles.
pub fn find_article<'a>(config: &'a SiteConfig, slug: &str) -> Option<&'a Article> {
    find_article_with_section(config, slug).map(|(_, article)| article)
}

/// Like [`find_article`], also returning the owning section.
pub fn find_article_with_section<'a>(
    config: &'a SiteConfig,
    slug: &str,
) -> Option<(&'a Section, &'a Article)> {
    config.sections.iter().find_map(|section| {
        section
            .items
            .iter()
            .find(|item| item.slug == slug)
            .map(|article| (section, article))
    })
}
