use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Errors surfaced by page handlers, rendered as HTML error pages.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let PageError::NotFound(what) = &self;
        tracing::debug!(what = %what, "Page not found");

        (status, Html(views::error::render(status, "页面不存在").into_string())).into_response()
    }
}
