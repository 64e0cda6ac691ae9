//! Article page and Markdown rendering.

use maud::{html, Markup, PreEscaped};
use pulldown_cmark::{html as md_html, Options, Parser};

use domain::models::Article;
use domain::services::sitemap::parse_article_date;
use domain::services::HeadMetadata;

use super::layout::{page, PageContext};

pub fn render(ctx: &PageContext<'_>, article: &Article) -> Markup {
    let head = HeadMetadata::for_article(ctx.config, article);

    page(
        &head,
        ctx,
        html! {
            article.article {
                @if let Some(url) = &article.image_url {
                    img.article-image src=(url) alt=(article.image_hint);
                }
                h1 { (article.title) }
                p.meta {
                    "发布于 " (display_date(&article.date))
                    @if let Some(author) = article.author.as_deref().filter(|a| !a.is_empty()) {
                        " · 作者：" (author)
                    }
                    @if let Some(version) = &article.version {
                        " · 版本 " (version)
                    }
                }
                div.article-content {
                    (PreEscaped(markdown_to_html(&article.content)))
                }
                p { a href=(ctx.home_href) { "← 返回首页" } }
            }
        },
    )
}

/// Render Markdown to HTML. Raw HTML in the source is kept.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    md_html::push_html(&mut out, parser);
    out
}

/// `YYYY-MM-DD` when the date parses, otherwise the raw value.
pub fn display_date(raw: &str) -> String {
    parse_article_date(raw)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}
