//! Shared fixtures for unit tests.

use serde_json::{json, Value};

use crate::models::SiteConfig;

/// A complete configuration with two sections holding one and two articles.
pub fn sample_config_value() -> Value {
    json!({
        "name": "PUBG Mobile",
        "seo": {
            "title": "Official Download",
            "description": "Download PUBG Mobile and read the latest news.",
            "keywords": ["pubg", "battle royale"],
            "ogImage": "https://cdn.apks.cc/pubg/og.png"
        },
        "analytics": {
            "verification": { "google": "g-structured" },
            "customHeadHtml": "<meta name=\"baidu-site-verification\" content=\"codeva-abc\" />"
        },
        "header": {
            "logo": { "url": "https://cdn.apks.cc/pubg/logo.png", "alt": "PUBG Mobile" }
        },
        "hero": {
            "backgroundImage": "https://cdn.apks.cc/pubg/hero.jpg",
            "title": "Battle on",
            "description": "Drop in, gear up."
        },
        "downloads": {
            "googlePlay": {
                "url": "https://play.google.com/store/apps/details?id=com.tencent.ig",
                "srText": "Get it on Google Play"
            },
            "appStore": null,
            "apk": {
                "line1": "Download",
                "line2": "APK",
                "dialog": {
                    "title": "Download APK",
                    "description": "Choose a mirror",
                    "panUrl": "https://pan.example.com/pubg",
                    "officialUrl": "https://www.pubgmobile.com/download"
                }
            }
        },
        "video": {
            "id": "video",
            "title": "Trailer",
            "url": "https://www.youtube.com/embed/abc123",
            "playerTitle": "PUBG Mobile trailer",
            "navLabel": "Video",
            "enabled": true
        },
        "footer": {
            "description": "Fan-made download hub.",
            "copyright": "© 2025 APKS Hub",
            "feedback": {
                "email": "feedback@apks.cc",
                "buttonText": "Feedback",
                "dialogTitle": "Send feedback",
                "dialogDescription": "Tell us what went wrong."
            }
        },
        "sections": [
            {
                "id": "articles",
                "title": "Guides",
                "navLabel": "Guides",
                "items": [
                    {
                        "slug": "beginner-guide",
                        "title": "Beginner guide",
                        "summary": "Survive your first match.",
                        "content": "# Landing\n\nPick a quiet spot.",
                        "author": "Editor",
                        "date": "2025-03-01",
                        "imageUrl": "https://cdn.apks.cc/pubg/guide.jpg",
                        "imageHint": "parachute"
                    }
                ]
            },
            {
                "id": "updates",
                "title": "Updates",
                "navLabel": "Updates",
                "enabled": false,
                "items": [
                    {
                        "slug": "v3-7",
                        "title": "Version 3.7",
                        "summary": "New map.",
                        "content": "Patch notes.",
                        "date": "2025-04-10T08:00:00Z",
                        "imageHint": "map",
                        "version": "3.7.0"
                    },
                    {
                        "slug": "v3-6",
                        "title": "Version 3.6",
                        "summary": "New weapons.",
                        "content": "Patch notes.",
                        "date": "not a date",
                        "imageUrl": null,
                        "imageHint": "weapons",
                        "version": "3.6.0"
                    }
                ]
            }
        ]
    })
}

pub fn sample_config() -> SiteConfig {
    serde_json::from_value(sample_config_value()).expect("sample config deserializes")
}
