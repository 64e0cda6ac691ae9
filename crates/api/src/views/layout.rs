//! Shared page chrome: document head, header navigation, footer, dialogs.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use domain::models::SiteConfig;
use domain::services::{HeadMetadata, HeadScript};

pub const HTML_LANG: &str = "zh-Hans";

const STYLESHEET: &str = r#"
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"PingFang SC","Microsoft YaHei",sans-serif;background:#0f1115;color:#e8e8ea;line-height:1.6}
a{color:inherit}
img{max-width:100%;display:block}
.container{max-width:1120px;margin:0 auto;padding:0 1rem}
.site-header{position:sticky;top:0;z-index:50;background:rgba(15,17,21,.92);border-bottom:1px solid #262a33}
.site-header .container{display:flex;align-items:center;justify-content:space-between;height:4rem;gap:1rem}
.brand{display:flex;align-items:center;gap:.5rem;font-weight:700;text-decoration:none}
.brand img{height:2rem;width:auto}
.site-nav ul{display:flex;gap:1.25rem;list-style:none;margin:0;padding:0}
.site-nav a{text-decoration:none;opacity:.85}
.site-nav a:hover{opacity:1}
.nav-toggle,.nav-hamburger{display:none}
.button{display:inline-block;padding:.6rem 1.2rem;border-radius:.5rem;background:#f2a900;color:#111;font-weight:600;text-decoration:none}
.hero{position:relative;min-height:60vh;display:flex;align-items:flex-end;overflow:hidden}
.hero-bg{position:absolute;inset:0;width:100%;height:100%;object-fit:cover;opacity:.45}
.hero-body{position:relative;padding:4rem 0}
.hero h1{font-size:clamp(2rem,5vw,3.5rem);margin:0 0 .5rem}
.downloads{display:flex;flex-wrap:wrap;gap:1rem;margin-top:1.5rem}
.store{display:flex;align-items:center;justify-content:center;min-width:10rem;height:3.25rem;border-radius:.5rem;background:#1d2028;border:1px solid #343946;text-decoration:none}
.store img{height:100%;width:auto}
.store.apk{flex-direction:column;line-height:1.1;background:#f2a900;color:#111;font-weight:700}
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap}
.page-section{padding:3rem 0}
.page-section h2{font-size:1.75rem;margin:0 0 1.5rem}
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1.25rem}
.card{background:#171a21;border:1px solid #262a33;border-radius:.75rem;overflow:hidden}
.card a{display:block;text-decoration:none}
.card img{aspect-ratio:16/9;object-fit:cover;width:100%}
.card-body{padding:1rem}
.card h3{margin:0 0 .5rem;font-size:1.1rem}
.card p{margin:0;opacity:.8}
.meta{font-size:.85rem;opacity:.6}
.video-frame{position:relative;aspect-ratio:16/9}
.video-frame iframe{position:absolute;inset:0;width:100%;height:100%;border:0;border-radius:.75rem}
.article{max-width:760px;margin:0 auto;padding:3rem 1rem}
.article-image{width:100%;border-radius:.75rem;margin-bottom:1.5rem}
.article-content img{border-radius:.5rem}
.article-content a{color:#f2a900}
.site-footer{border-top:1px solid #262a33;padding:2rem 0;text-align:center;opacity:.85}
.dialog{display:none;position:fixed;inset:0;z-index:100;background:rgba(0,0,0,.6);align-items:center;justify-content:center}
.dialog:target{display:flex}
.dialog-panel{background:#171a21;border:1px solid #343946;border-radius:.75rem;padding:1.5rem;max-width:420px;width:calc(100% - 2rem)}
.dialog-actions{display:grid;gap:.75rem;margin-top:1rem}
.error-page{text-align:center;padding:6rem 1rem}
@media (max-width:768px){
.nav-hamburger{display:block;cursor:pointer;font-size:1.5rem}
.site-nav{display:none;position:absolute;top:4rem;left:0;right:0;background:#0f1115;border-bottom:1px solid #262a33}
.site-nav ul{flex-direction:column;padding:1rem}
.nav-toggle:checked~.site-nav{display:block}
}
"#;

/// Rendering context shared by every tenant page.
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub package: &'a str,
    /// Canonical home path, e.g. `/PUBG%20Mobile/com.tencent.ig`.
    pub home_href: String,
}

impl PageContext<'_> {
    /// Anchor on the home page, usable from any tenant page.
    pub fn anchor(&self, id: &str) -> String {
        format!("{}#{}", self.home_href, id)
    }
}

/// One header navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Home, then every enabled section, then the video when enabled.
pub fn nav_links(ctx: &PageContext<'_>) -> Vec<NavLink> {
    let config = ctx.config;
    let mut links = vec![NavLink {
        href: ctx.anchor("home"),
        label: "首页".to_string(),
    }];

    links.extend(config.enabled_sections().map(|section| NavLink {
        href: ctx.anchor(&section.id),
        label: section.nav_label.clone(),
    }));

    if config.video.enabled {
        links.push(NavLink {
            href: ctx.anchor(&config.video.id),
            label: config.video.nav_label.clone(),
        });
    }

    links
}

/// Full HTML document for a tenant page.
pub fn page(head: &HeadMetadata, ctx: &PageContext<'_>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(HTML_LANG) {
            head {
                (head_tags(head))
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                (site_header(ctx))
                main { (content) }
                (site_footer(ctx))
                (apk_dialog(ctx.config))
                (feedback_dialog(ctx.config))
            }
        }
    }
}

/// Minimal document for pages rendered without a tenant config.
pub fn bare_page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(HTML_LANG) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="robots" content="noindex";
                title { (title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body { main { (content) } }
        }
    }
}

fn head_tags(head: &HeadMetadata) -> Markup {
    html! {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { (head.title) }
        meta name="description" content=(head.description);
        @if !head.keywords.is_empty() {
            meta name="keywords" content=(head.keywords.join(","));
        }

        meta property="og:type" content="website";
        meta property="og:title" content=(head.open_graph.title);
        meta property="og:description" content=(head.open_graph.description);
        @for image in &head.open_graph.images {
            meta property="og:image" content=(image);
        }

        meta name="twitter:card" content=(head.twitter.card);
        meta name="twitter:title" content=(head.twitter.title);
        meta name="twitter:description" content=(head.twitter.description);
        @for image in &head.twitter.images {
            meta name="twitter:image" content=(image);
        }

        @for (name, content) in head.verification.meta_tags() {
            meta name=(name) content=(content);
        }
        @for (name, content) in &head.other {
            meta name=(name) content=(content);
        }

        @for script in &head.scripts {
            @match script {
                HeadScript::External(src) => {
                    script src=(src) async {}
                }
                HeadScript::Inline(body) => {
                    script { (PreEscaped(body)) }
                }
            }
        }
    }
}

fn site_header(ctx: &PageContext<'_>) -> Markup {
    let logo = &ctx.config.header.logo;
    html! {
        header.site-header {
            div.container {
                a.brand href=(ctx.home_href) {
                    @if let Some(url) = &logo.url {
                        img src=(url) alt=(logo.alt);
                    } @else {
                        span { (logo.alt) }
                    }
                }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="菜单" { "☰" }
                nav.site-nav {
                    ul {
                        @for link in nav_links(ctx) {
                            li { a href=(link.href) { (link.label) } }
                        }
                    }
                }
                @if ctx.config.downloads.any_enabled() {
                    a.button href=(ctx.anchor("download")) { "游戏下载" }
                }
            }
        }
    }
}

fn site_footer(ctx: &PageContext<'_>) -> Markup {
    let footer = &ctx.config.footer;
    html! {
        footer.site-footer {
            div.container {
                p { (footer.description) }
                p { a href="#feedback-dialog" { (footer.feedback.button_text) } }
                p.meta { (footer.copyright) }
            }
        }
    }
}

fn apk_dialog(config: &SiteConfig) -> Markup {
    html! {
        @if let Some(apk) = &config.downloads.apk {
            div.dialog id="apk-dialog" role="dialog" aria-labelledby="apk-dialog-title" {
                div.dialog-panel {
                    h2 id="apk-dialog-title" { (apk.dialog.title) }
                    p { (apk.dialog.description) }
                    div.dialog-actions {
                        @if let Some(url) = &apk.dialog.pan_url {
                            a.button href=(url) target="_blank" rel="noopener noreferrer" { "网盘下载" }
                        }
                        @if let Some(url) = &apk.dialog.official_url {
                            a.button href=(url) target="_blank" rel="noopener noreferrer" { "官网下载" }
                        }
                        a href="#" { "关闭" }
                    }
                }
            }
        }
    }
}

fn feedback_dialog(config: &SiteConfig) -> Markup {
    let feedback = &config.footer.feedback;
    html! {
        div.dialog id="feedback-dialog" role="dialog" aria-labelledby="feedback-dialog-title" {
            div.dialog-panel {
                h2 id="feedback-dialog-title" { (feedback.dialog_title) }
                p { (feedback.dialog_description) }
                div.dialog-actions {
                    a.button href={ "mailto:" (feedback.email) } { (feedback.email) }
                    a href="#" { "关闭" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_config;

    fn ctx(config: &SiteConfig) -> PageContext<'_> {
        PageContext {
            config,
            package: "com.tencent.ig",
            home_href: "/PUBG%20Mobile/com.tencent.ig".to_string(),
        }
    }

    #[test]
    fn test_nav_links_home_sections_video() {
        let mut config = sample_config();
        config.video.enabled = true;

        let links = nav_links(&ctx(&config));
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();

        assert_eq!(
            hrefs,
            vec![
                "/PUBG%20Mobile/com.tencent.ig#home",
                "/PUBG%20Mobile/com.tencent.ig#articles",
                "/PUBG%20Mobile/com.tencent.ig#updates",
                "/PUBG%20Mobile/com.tencent.ig#video",
            ]
        );
        assert_eq!(links[0].label, "首页");
    }

    #[test]
    fn test_nav_links_skip_disabled() {
        let mut config = sample_config();
        config.video.enabled = false;
        config.sections[1].enabled = Some(false);

        let links = nav_links(&ctx(&config));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_page_renders_head_and_chrome() {
        let config = sample_config();
        let head = HeadMetadata::from_config(&config);
        let html = page(&head, &ctx(&config), html! { p { "body" } }).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="zh-Hans">"#));
        assert!(html.contains(&format!("<title>{}</title>", head.title)));
        assert!(html.contains(r#"<meta property="og:title""#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"id="feedback-dialog""#));
        assert!(html.contains("mailto:feedback@apks.cc"));
    }

    #[test]
    fn test_apk_dialog_links() {
        let mut config = sample_config();
        let html = apk_dialog(&config).into_string();
        assert!(html.contains("官网下载"));
        assert!(!html.contains("网盘下载"));

        config.downloads.apk = None;
        assert!(apk_dialog(&config).into_string().is_empty());
    }

    #[test]
    fn test_head_scripts_render() {
        let config = sample_config();
        let mut head = HeadMetadata::from_config(&config);
        head.scripts = vec![
            HeadScript::External("https://stats.example.com/s.js".to_string()),
            HeadScript::Inline("track(1 < 2);".to_string()),
        ];

        let html = head_tags(&head).into_string();
        assert!(html.contains(r#"<script src="https://stats.example.com/s.js" async></script>"#));
        assert!(html.contains("<script>track(1 < 2);</script>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut config = sample_config();
        config.footer.description = "<b>bold</b>".to_string();
        let html = site_footer(&ctx(&config)).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
