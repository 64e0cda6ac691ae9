//! Tenant home page.

use maud::{html, Markup};

use domain::models::{Article, Downloads, Section, SiteConfig, Video};
use domain::services::{article_path, HeadMetadata};

use super::article::display_date;
use super::layout::{page, PageContext};

pub fn render(ctx: &PageContext<'_>) -> Markup {
    let config = ctx.config;
    let head = HeadMetadata::from_config(config);

    page(
        &head,
        ctx,
        html! {
            (hero(config))
            @if config.video.enabled {
                (video_section(&config.video))
            }
            @for section in config.enabled_sections() {
                (article_section(ctx, section))
            }
        },
    )
}

fn hero(config: &SiteConfig) -> Markup {
    let hero = &config.hero;
    html! {
        section.hero id="home" {
            @if let Some(url) = &hero.background_image {
                img.hero-bg src=(url) alt="";
            }
            div.container.hero-body {
                h1 { (hero.title) }
                p { (hero.description) }
                @if config.downloads.any_enabled() {
                    (download_buttons(&config.downloads))
                }
            }
        }
    }
}

fn download_buttons(downloads: &Downloads) -> Markup {
    html! {
        div.downloads id="download" {
            @for button in [&downloads.google_play, &downloads.app_store].into_iter().flatten() {
                a.store href=(button.url.as_deref().unwrap_or("#download")) target="_blank" rel="noopener noreferrer" {
                    @if let Some(image) = &button.background_image {
                        img src=(image) alt="";
                    }
                    span.sr-only[button.background_image.is_some()] { (button.sr_text) }
                }
            }
            @if let Some(apk) = &downloads.apk {
                a.store.apk href="#apk-dialog" {
                    @if let Some(image) = &apk.background_image {
                        img src=(image) alt="";
                    }
                    span { (apk.line1) }
                    span { (apk.line2) }
                }
            }
        }
    }
}

fn video_section(video: &Video) -> Markup {
    html! {
        section.page-section id=(video.id) {
            div.container {
                h2 { (video.title) }
                @if let Some(url) = &video.url {
                    div.video-frame {
                        iframe src=(url) title=(video.player_title)
                            allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen {}
                    }
                }
            }
        }
    }
}

fn article_section(ctx: &PageContext<'_>, section: &Section) -> Markup {
    html! {
        section.page-section id=(section.id) {
            div.container {
                h2 { (section.title) }
                div.cards {
                    @for item in section.items.iter().filter(|item| !item.slug.is_empty()) {
                        (article_card(ctx, item))
                    }
                }
            }
        }
    }
}

fn article_card(ctx: &PageContext<'_>, article: &Article) -> Markup {
    let href = article_path(&ctx.config.name, ctx.package, &article.slug);
    html! {
        article.card {
            a href=(href) {
                @if let Some(url) = &article.image_url {
                    img src=(url) alt=(article.image_hint) loading="lazy";
                }
                div.card-body {
                    h3 { (article.title) }
                    p { (article.summary) }
                    p.meta {
                        @if let Some(version) = &article.version {
                            "v" (version) " · "
                        }
                        (display_date(&article.date))
                    }
                }
            }
        }
    }
}
