//! Error pages.

use axum::http::StatusCode;
use maud::{html, Markup};

use super::layout::bare_page;

pub fn render(status: StatusCode, message: &str) -> Markup {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");

    bare_page(
        &format!("{code} {reason}"),
        html! {
            div.error-page {
                h1 { (code) }
                p { (message) }
                p { a href="/" { "返回首页" } }
            }
        },
    )
}
